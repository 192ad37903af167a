//! Built-in networks.
//!
//! - [`sample_network`]: four intersections around Satyana Road, used when a
//!   scenario runs before anything has been loaded.
//! - [`square_network`]: the controlled four-way "square" (chowk) described
//!   by [`SquareLayout::standard`].

use tn_core::{NodeId, RoadId};

use crate::incident::Incident;
use crate::source::{EdgeRecord, NetworkData, NodeRecord};

/// Four intersections, four roads.
///
/// ```text
///   1 ──10── 2
///   │        │
///   16       12
///   │        │
///   └─────── 3 ──14── 4
/// ```
pub fn sample_network() -> NetworkData {
    NetworkData {
        nodes: vec![
            NodeRecord::new(1, 31.5200, 74.3587),
            NodeRecord::new(2, 31.5210, 74.3592),
            NodeRecord::new(3, 31.5215, 74.3600),
            NodeRecord::new(4, 31.5220, 74.3607),
        ],
        edges: vec![
            EdgeRecord::timed(1, 2, 100.0, 10.0, "Satyana Road"),
            EdgeRecord::timed(2, 3, 120.0, 12.0, "Salemi Chowk Road"),
            EdgeRecord::timed(3, 4, 140.0, 14.0, "Satyana Road"),
            EdgeRecord::timed(1, 3, 160.0, 16.0, "Link Road"),
        ],
    }
}

// ── Square intersection ───────────────────────────────────────────────────────

/// Node roles of a square intersection.
///
/// `corners` run clockwise and are joined in a cycle
/// (`c0-c1`, `c1-c2`, `c2-c3`, `c3-c0`); `approaches[i]` is the external
/// node whose road enters the square at `corners[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SquareLayout {
    pub corners:    [NodeId; 4],
    pub approaches: [NodeId; 4],
}

impl SquareLayout {
    /// Corners 1 (NW), 2 (NE), 3 (SE), 4 (SW); approaches 5 (north), 6 (east),
    /// 7 (south), 8 (west).
    pub fn standard() -> Self {
        Self {
            corners:    [NodeId(1), NodeId(2), NodeId(3), NodeId(4)],
            approaches: [NodeId(5), NodeId(6), NodeId(7), NodeId(8)],
        }
    }

    #[inline]
    pub fn is_corner(&self, node: NodeId) -> bool {
        self.corners.contains(&node)
    }

    /// `true` when both endpoints of `road` are corners.
    pub fn is_square_road(&self, road: RoadId) -> bool {
        let (a, b) = road.endpoints();
        self.is_corner(a) && self.is_corner(b)
    }

    /// The canonical paths through the square, in evaluation order:
    /// four straight-through, four turning, four around-the-square.
    pub fn templates(&self) -> Vec<Vec<NodeId>> {
        let c = |i: usize| self.corners[i % 4];
        let a = |i: usize| self.approaches[i % 4];

        let straight = (0..4).map(|i| vec![a(i), c(i), c(i + 1), a(i + 1)]);
        let turning = (0..4).map(|i| vec![a(i), c(i), c(i + 3), a(i + 3)]);
        let around = (0..4).map(|i| vec![a(i), c(i), c(i + 1), c(i + 2), a(i + 2)]);

        straight.chain(turning).chain(around).collect()
    }

    /// Accident on the north road (`c0-c1`), severity 0.8.
    pub fn north_road_incident(&self) -> Incident {
        Incident {
            road_id:     RoadId::new(self.corners[0], self.corners[1]),
            severity:    0.8,
            description: Some("Traffic accident on North Road".to_owned()),
        }
    }
}

/// The [`SquareLayout::standard`] network: 8 intersections, 8 roads.
///
/// Square roads are declared before approach roads, so every corner lists
/// its two square roads ahead of its approach.
pub fn square_network() -> NetworkData {
    NetworkData {
        nodes: vec![
            NodeRecord::new(1, 31.5210, 74.3580),
            NodeRecord::new(2, 31.5210, 74.3594),
            NodeRecord::new(3, 31.5196, 74.3594),
            NodeRecord::new(4, 31.5196, 74.3580),
            NodeRecord::new(5, 31.5225, 74.3580),
            NodeRecord::new(6, 31.5210, 74.3610),
            NodeRecord::new(7, 31.5181, 74.3594),
            NodeRecord::new(8, 31.5196, 74.3564),
        ],
        edges: vec![
            EdgeRecord::timed(1, 2, 150.0, 3.0, "North Road"),
            EdgeRecord::timed(2, 3, 150.0, 3.0, "East Road"),
            EdgeRecord::timed(3, 4, 150.0, 3.0, "South Road"),
            EdgeRecord::timed(4, 1, 150.0, 3.0, "West Road"),
            EdgeRecord::timed(5, 1, 200.0, 4.0, "North Approach"),
            EdgeRecord::timed(6, 2, 200.0, 4.0, "East Approach"),
            EdgeRecord::timed(7, 3, 200.0, 4.0, "South Approach"),
            EdgeRecord::timed(8, 4, 200.0, 4.0, "West Approach"),
        ],
    }
}
