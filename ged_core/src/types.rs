//! Dense integer identifiers shared across the workspace.
//!
//! All ids are plain `u32` newtypes with identity semantics only. Node and
//! edge ids are local to one graph; graph ids are local to one [`crate::GedData`]
//! collection; label ids are local to the collection's label alphabet.

use contracts::*;
use std::fmt;

/// Identifier of a node inside a single graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    /// The underlying raw integer index.
    inner: u32,
}

/// Identifier of an edge inside a single graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId {
    /// The underlying raw integer index.
    inner: u32,
}

/// Identifier of a graph inside a [`crate::GedData`] collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId {
    /// The underlying raw integer index.
    inner: u32,
}

/// Identifier of a node or edge label inside the collection's alphabet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId {
    /// The underlying raw integer index.
    inner: u32,
}

macro_rules! impl_id {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Creates a new id from a raw integer.
            #[ensures(ret.inner == id)]
            pub const fn new(id: u32) -> Self {
                Self { inner: id }
            }

            /// Returns the id as a usize for array access.
            #[ensures(ret == self.inner as usize)]
            pub const fn as_usize(self) -> usize {
                self.inner as usize
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.inner)
            }
        }

        impl From<usize> for $ty {
            #[inline]
            fn from(id: usize) -> Self {
                Self { inner: id as u32 }
            }
        }

        impl From<$ty> for usize {
            #[inline]
            fn from(id: $ty) -> Self {
                id.inner as Self
            }
        }

        impl From<$ty> for u32 {
            #[inline]
            fn from(id: $ty) -> Self {
                id.inner
            }
        }
    };
}

impl_id!(NodeId, "n");
impl_id!(EdgeId, "e");
impl_id!(GraphId, "g");
impl_id!(LabelId, "l");

/// Sentinel label for unlabeled nodes and edges.
///
/// Cost functions treat this value as the "no label" epsilon symbol.
pub const DUMMY_LABEL: LabelId = LabelId { inner: u32::MAX };

impl LabelId {
    /// Returns true if this is the [`DUMMY_LABEL`] sentinel.
    #[must_use]
    pub const fn is_dummy(self) -> bool {
        self.inner == u32::MAX
    }
}
