//! Strongly typed identifiers.
//!
//! Two families live here:
//!
//! - **Stable keys** (`NodeId`, `RoadId`) name intersections and roads the
//!   way the network-load source does.  They survive reloads and are what
//!   incidents, routes, and signal plans refer to.
//! - **Arena indices** (`NodeIx`, `EdgeIx`) address the `Vec`s inside one
//!   `RoadGraph`.  They are only meaningful for the graph that produced them.

use std::fmt;
use std::str::FromStr;

use crate::TnError;

/// Generate a typed arena index around a primitive integer.
macro_rules! typed_index {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel for "no valid index" (`u32::MAX`).
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized indices are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_index! {
    /// Position of an intersection in a `RoadGraph`'s node arena.
    pub struct NodeIx(u32);
}

typed_index! {
    /// Position of a road in a `RoadGraph`'s road arena.
    pub struct EdgeIx(u32);
}

// ── NodeId ────────────────────────────────────────────────────────────────────

/// Stable intersection identifier as supplied by the network-load source.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    #[inline]
    fn from(id: u64) -> NodeId {
        NodeId(id)
    }
}

// ── RoadId ────────────────────────────────────────────────────────────────────

/// Identifier of an undirected road, derived from its two endpoints.
///
/// The pair is stored in ascending order, so `RoadId::new(a, b)` and
/// `RoadId::new(b, a)` compare, hash, and print identically.  The textual
/// form is `"lo-hi"`; parsing accepts either endpoint order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct RoadId {
    lo: NodeId,
    hi: NodeId,
}

impl RoadId {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            RoadId { lo: a, hi: b }
        } else {
            RoadId { lo: b, hi: a }
        }
    }

    /// Both endpoints, lower id first.
    #[inline]
    pub fn endpoints(self) -> (NodeId, NodeId) {
        (self.lo, self.hi)
    }

    #[inline]
    pub fn touches(self, node: NodeId) -> bool {
        self.lo == node || self.hi == node
    }
}

impl fmt::Display for RoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.lo.0, self.hi.0)
    }
}

impl FromStr for RoadId {
    type Err = TnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_end = |part: &str| {
            part.trim()
                .parse::<u64>()
                .map(NodeId)
                .map_err(|_| TnError::Parse(format!("invalid road id {s:?}: expected \"<node>-<node>\"")))
        };
        let (a, b) = s
            .split_once('-')
            .ok_or_else(|| TnError::Parse(format!("invalid road id {s:?}: missing '-' separator")))?;
        Ok(RoadId::new(parse_end(a)?, parse_end(b)?))
    }
}

impl From<RoadId> for String {
    fn from(id: RoadId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for RoadId {
    type Error = TnError;
    fn try_from(s: String) -> Result<RoadId, TnError> {
        s.parse()
    }
}
