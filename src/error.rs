//! Error type for the bridge and its mapping onto wire status codes.

/// Error returned by command decoding, dispatch, and guest marshaling.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The command tag is not part of the closed enumeration.
    #[error("unknown command tag: {0}")]
    UnknownCommand(u32),
    /// A guest-supplied region does not fit inside guest linear memory.
    #[error("region [{base}, {base}+{len}) exceeds guest memory of {memory} bytes")]
    RegionOutOfBounds { base: u32, len: u32, memory: u64 },
    /// A region is too small (or oddly sized) for the values exchanged
    /// through it.
    #[error("region of {got} bytes cannot hold {need} bytes")]
    RegionTooSmall { need: u32, got: u32 },
    /// `SetCallbacks` supplied more function references than the table has
    /// slots.
    #[error("callback array has {got} entries, table holds {max}")]
    TooManyCallbacks { got: usize, max: usize },
    /// A guest export (allocator, memory, function table) failed or is
    /// missing.
    #[error("guest call failed: {0}")]
    Guest(String),
    /// A browser-side effect failed in a way the web layer chose to report
    /// rather than throw.
    #[error("page call failed: {0}")]
    Page(String),
}

/// Wire status for a successfully dispatched command.
pub const STATUS_OK: u32 = 0;

impl BridgeError {
    /// Wire status code for this error. `0` is reserved for success.
    #[must_use]
    pub fn status(&self) -> u32 {
        match self {
            Self::UnknownCommand(_) => 1,
            Self::RegionOutOfBounds { .. } => 2,
            Self::RegionTooSmall { .. } => 3,
            Self::TooManyCallbacks { .. } => 4,
            Self::Guest(_) => 5,
            Self::Page(_) => 6,
        }
    }
}
