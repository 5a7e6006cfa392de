//! Typed index wrappers for the three entity kinds in a run.
//!
//! Nodes, edges, and agents all live in id-indexed `Vec`s, so an id is just
//! a `u32` position — but mixing them up is the kind of bug that survives
//! every test on a square network.  The wrappers cost nothing and make such
//! a mix-up a type error.  The inner integer stays `pub` for id-indexed
//! storage; `index()` is the usual way in.

use std::fmt;

macro_rules! entity_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, $label:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel for "not assigned yet"; never a valid index.
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// `INVALID`, so a forgotten assignment is loud rather than id 0.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, " {}"), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                u32::try_from(n).map($name)
            }
        }
    };
}

entity_id! {
    /// Position of a UAV in the fleet roster.
    pub struct AgentId, "uav"
}

entity_id! {
    /// Position of a survey point (junction or recharge pad) in the network.
    pub struct NodeId, "node"
}

entity_id! {
    /// Position of an undirected segment in the network.
    pub struct EdgeId, "edge"
}
