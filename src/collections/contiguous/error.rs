//! Error types shared by the contiguous collections.
//!
//! Each failure is its own struct so that callers can match on exactly what went wrong.
//! [`ReserveError`] groups the two ways that acquiring more capacity can fail.
use std::alloc::Layout;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::{Display, Error, From, IsVariant, TryInto};

/// An index was used that is not less than the number of live elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    /// The index that was requested.
    pub index: usize,
    /// The length of the collection at the time of the request.
    pub len: usize,
}

impl Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Index {} out of bounds for collection with {} elements!", self.index, self.len)
    }
}

impl Error for IndexOutOfBounds {}

/// The requested capacity would produce an allocation larger than [`isize::MAX`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityOverflow;

impl Display for CapacityOverflow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Capacity overflow!")
    }
}

impl Error for CapacityOverflow {}

/// The global allocator was unable to provide memory for the given layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocFailed {
    /// The layout that was requested.
    pub layout: Layout,
}

impl Display for AllocFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to allocate {} bytes!", self.layout.size())
    }
}

impl Error for AllocFailed {}

/// The ways in which growing a collection can fail. When one of these is returned, the collection
/// is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From, TryInto, IsVariant)]
pub enum ReserveError {
    /// See [`CapacityOverflow`].
    CapacityOverflow(CapacityOverflow),
    /// See [`AllocFailed`].
    AllocFailed(AllocFailed),
}

/// A nul byte was found inside text that is being converted to a nul-terminated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteriorNul {
    /// The byte offset of the first nul byte.
    pub position: usize,
}

impl Display for InteriorNul {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Found an interior nul byte at position {}!", self.position)
    }
}

impl Error for InteriorNul {}
