//! Signal plan records.
//!
//! Cycles at one intersection run back to back: each green starts when the
//! previous cycle's yellow ends, and the plan's total is the sum of all
//! greens and yellows.  [`SignalPlan::chained`] is the only constructor, so
//! every plan satisfies that by construction.

use tn_core::{NodeId, RoadId};

/// Green/yellow allocation for one road at one intersection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cycle {
    pub road_id:         RoadId,
    /// Seconds from the start of the plan.
    pub green_start:     u32,
    pub green_duration:  u32,
    pub yellow_duration: u32,
}

impl Cycle {
    /// Second at which the next cycle's green starts.
    #[inline]
    pub fn end(&self) -> u32 {
        self.green_start + self.green_duration + self.yellow_duration
    }
}

/// Ordered signal cycles for one intersection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalPlan {
    pub intersection_id:  NodeId,
    pub cycles:           Vec<Cycle>,
    pub total_cycle_time: u32,
}

impl SignalPlan {
    /// Lay out `(road, green, yellow)` phases back to back from second 0.
    pub fn chained(
        intersection_id: NodeId,
        phases: impl IntoIterator<Item = (RoadId, u32, u32)>,
    ) -> SignalPlan {
        let mut clock = 0;
        let cycles: Vec<Cycle> = phases
            .into_iter()
            .map(|(road_id, green, yellow)| {
                let cycle = Cycle {
                    road_id,
                    green_start:     clock,
                    green_duration:  green,
                    yellow_duration: yellow,
                };
                clock = cycle.end();
                cycle
            })
            .collect();
        SignalPlan { intersection_id, cycles, total_cycle_time: clock }
    }

    /// `true` when every cycle starts where the previous one ended and the
    /// total matches the sum of phases.
    pub fn is_chained(&self) -> bool {
        let mut clock = 0;
        for cycle in &self.cycles {
            if cycle.green_start != clock {
                return false;
            }
            clock = cycle.end();
        }
        clock == self.total_cycle_time
    }

    /// The cycle serving `road`, if any.
    pub fn cycle_for(&self, road: RoadId) -> Option<&Cycle> {
        self.cycles.iter().find(|c| c.road_id == road)
    }
}
