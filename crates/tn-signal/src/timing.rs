//! Signal timing constants.

/// Green and yellow durations, in seconds, used by every planner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalTimings {
    /// Green for each road at an unaffected intersection.
    pub default_green: u32,
    /// Yellow after every green.
    pub yellow: u32,
    /// Green for incident-free roads at an intersection next to an incident.
    pub priority_green: u32,
    /// Green for the incident roads themselves.
    pub incident_green: u32,
    /// Green for square-internal roads.
    pub square_green: u32,
    /// Green for a square-internal road with an incident on it.
    pub square_incident_green: u32,
    /// Green for approach roads entering the square.
    pub external_green: u32,
}

impl Default for SignalTimings {
    fn default() -> Self {
        Self {
            default_green:         30,
            yellow:                5,
            priority_green:        45,
            incident_green:        15,
            square_green:          30,
            square_incident_green: 15,
            external_green:        20,
        }
    }
}
