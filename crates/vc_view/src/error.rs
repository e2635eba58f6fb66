use thiserror::Error;

// -----------------------------------------------------------------------------
// ErrorKind

/// The broad class of a [`MemError`].
///
/// All of them are precondition violations; [`Allocation`](Self::Allocation)
/// is the only one a caller can realistically recover from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An index or range outside `[0, len)`.
    Bounds,
    /// A view with a null backing pointer where a usable one was required.
    NullPointer,
    /// A destination too small for the requested copy.
    Capacity,
    /// An allocation request that could not be satisfied.
    Allocation,
}

// -----------------------------------------------------------------------------
// MemError

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MemError {
    #[error("index {index} is out of range for a view of length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("range {start}..{end} is invalid for a view of length {len}")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("view has a null pointer")]
    NullPointer,

    #[error("destination of {available} bytes is too small for {required} bytes")]
    Capacity { required: usize, available: usize },

    #[error("failed to allocate {size} bytes with alignment {align}")]
    Allocation { size: usize, align: usize },

    #[error("block at {addr:#x} ({len} bytes) is not a live allocation of this allocator")]
    UnknownBlock { addr: usize, len: usize },

    #[error("cannot reinterpret {len} bytes as `{type_name}`")]
    Cast { len: usize, type_name: &'static str },
}

impl MemError {
    /// Returns the class of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_view::{ErrorKind, MemError};
    ///
    /// let err = MemError::OutOfBounds { index: 3, len: 3 };
    /// assert_eq!(err.kind(), ErrorKind::Bounds);
    /// ```
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds { .. } | Self::InvalidRange { .. } | Self::Cast { .. } => {
                ErrorKind::Bounds
            }
            Self::NullPointer => ErrorKind::NullPointer,
            Self::Capacity { .. } => ErrorKind::Capacity,
            Self::Allocation { .. } | Self::UnknownBlock { .. } => ErrorKind::Allocation,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
