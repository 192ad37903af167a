//! Geographic coordinate type.
//!
//! Coordinates are `f64` because they flow unchanged into route waypoints and
//! out through the serialization boundary.

use crate::NodeId;

/// Anchor for pseudo-coordinates handed to intersections the load source left
/// without a position.
const PSEUDO_ORIGIN: GeoPoint = GeoPoint { lat: 40.7128, lon: -74.0060 };

/// Grid spacing of pseudo-coordinates, in degrees.
const PSEUDO_STEP_DEG: f64 = 0.01;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Deterministic stand-in position for an intersection with no
    /// coordinates.
    ///
    /// The id is folded onto a 10 × 100 grid next to [`PSEUDO_ORIGIN`]: the
    /// last digit picks the latitude row, the next two digits the longitude
    /// column.  Same id, same point, every call.
    pub fn pseudo(id: NodeId) -> GeoPoint {
        let folded = id.0 % 1_000;
        GeoPoint {
            lat: PSEUDO_ORIGIN.lat + (folded % 10) as f64 * PSEUDO_STEP_DEG,
            lon: PSEUDO_ORIGIN.lon + (folded / 10) as f64 * PSEUDO_STEP_DEG,
        }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
