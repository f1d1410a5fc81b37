//! Error types for isomesh_core lookups.
//!
//! A plain enum with a hand-written `Display` so the crate builds without std.

use core::fmt;

/// Errors returned by the checked table and grid lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsoCoreError {
    /// A cube configuration code did not fit in 8 bits.
    ConfigurationOutOfRange {
        /// The rejected code.
        code: usize,
    },
    /// An edge id outside `0..12`.
    EdgeOutOfRange {
        /// The rejected edge id.
        edge: usize,
    },
    /// A grid coordinate outside `0..points_per_axis`.
    CoordinateOutOfBounds {
        /// The offending coordinate component.
        coord: u32,
        /// Largest valid coordinate (points_per_axis - 1).
        max: u32,
    },
}

impl fmt::Display for IsoCoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsoCoreError::ConfigurationOutOfRange { code } => {
                write!(f, "cube configuration {} is outside 0..=255", code)
            }
            IsoCoreError::EdgeOutOfRange { edge } => {
                write!(f, "edge id {} is outside 0..12", edge)
            }
            IsoCoreError::CoordinateOutOfBounds { coord, max } => {
                write!(f, "grid coordinate {} exceeds maximum {}", coord, max)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IsoCoreError {}
