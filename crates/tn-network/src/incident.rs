//! Incident overlay: congestion applied to a working copy of the graph.
//!
//! An [`Incident`] is an immutable value.  Applying it rewrites one road's
//! effective travel time from the road's retained **base** time, never from a
//! previously adjusted value, so re-applying the same incident is a no-op and
//! two incidents on one road do not compound: the last one applied wins.

use log::{debug, warn};

use tn_core::RoadId;

use crate::graph::{IncidentState, RoadGraph};
use crate::{NetworkError, NetworkResult};

/// Severity at or above which a road is treated as impassable.
pub const BLOCKING_SEVERITY: f64 = 0.99;

/// A traffic incident on one road.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Incident {
    pub road_id: RoadId,
    /// Impact in `[0, 1]`; `1.0` means fully blocked.
    pub severity: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl Incident {
    /// Validated constructor.
    pub fn new(road_id: RoadId, severity: f64, description: Option<String>) -> NetworkResult<Self> {
        let incident = Incident { road_id, severity, description };
        incident.validate()?;
        Ok(incident)
    }

    /// Reject severities outside `[0, 1]` (including NaN).
    ///
    /// Incidents built by deserialization skip [`Incident::new`], so every
    /// mutation path calls this again before touching a graph.
    pub fn validate(&self) -> NetworkResult<()> {
        if (0.0..=1.0).contains(&self.severity) {
            Ok(())
        } else {
            Err(NetworkError::InvalidSeverity(self.severity))
        }
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.severity >= BLOCKING_SEVERITY
    }
}

/// Incident-adjusted travel time for a road with base time `base`.
///
/// `base / (1 - severity)` below [`BLOCKING_SEVERITY`], `f64::INFINITY` from
/// there up to `1.0`.  Severities outside `[0, 1]` are an error.
pub fn effective_travel_time(base: f64, severity: f64) -> NetworkResult<f64> {
    if !(0.0..=1.0).contains(&severity) {
        return Err(NetworkError::InvalidSeverity(severity));
    }
    if severity >= BLOCKING_SEVERITY {
        Ok(f64::INFINITY)
    } else {
        Ok(base / (1.0 - severity))
    }
}

impl RoadGraph {
    /// Overlay `incident` onto this graph.
    ///
    /// Returns `Ok(false)` without touching anything when the road does not
    /// exist: a stale incident has no effect.  Travel time, flag, severity,
    /// and description are written together or not at all.
    pub fn apply_incident(&mut self, incident: &Incident) -> NetworkResult<bool> {
        incident.validate()?;
        let Some(e) = self.find_road(incident.road_id) else {
            warn!("incident on unknown road {} ignored", incident.road_id);
            return Ok(false);
        };

        let road = self.road_mut(e);
        let travel_time = effective_travel_time(road.base_travel_time(), incident.severity)?;
        road.set_incident(
            travel_time,
            IncidentState {
                severity:    incident.severity,
                description: incident.description.clone(),
            },
        );
        debug!(
            "road {} severity {} travel time {} -> {}",
            incident.road_id,
            incident.severity,
            road.base_travel_time(),
            travel_time
        );
        Ok(true)
    }

    /// Validate every incident, then apply them in order.
    ///
    /// Returns how many matched a road.  One invalid incident rejects the
    /// whole batch before any road is modified.
    pub fn apply_incidents(&mut self, incidents: &[Incident]) -> NetworkResult<usize> {
        for incident in incidents {
            incident.validate()?;
        }
        let mut applied = 0;
        for incident in incidents {
            if self.apply_incident(incident)? {
                applied += 1;
            }
        }
        Ok(applied)
    }
}
