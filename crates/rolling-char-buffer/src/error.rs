use thiserror::Error;

/// A call that broke the buffer's addressing contract.
///
/// These are defects in the calling code rather than runtime conditions. They
/// are checked on every call and reported before any state is touched, so a
/// buffer that returned one is still consistent and may keep being used.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractViolation {
    /// A read more than one position past the last produced character.
    #[error("cannot read position {pos}: only {next_pos} may be read next")]
    ReadAhead {
        /// Requested position.
        pos: usize,
        /// Current frontier.
        next_pos: usize,
    },
    /// A read below the start of the window.
    #[error("position {pos} was released (window starts at {window_start})")]
    Released {
        /// Requested position.
        pos: usize,
        /// First retained position.
        window_start: usize,
    },
    /// A range read of length zero.
    #[error("empty range requested at position {start}")]
    EmptyRange {
        /// Requested start position.
        start: usize,
    },
    /// A range read that does not lie entirely inside the window.
    #[error("range {start}+{len} is outside the window [{window_start}, {next_pos})")]
    RangeOutOfWindow {
        /// Requested start position.
        start: usize,
        /// Requested length.
        len: usize,
        /// First retained position.
        window_start: usize,
        /// Current frontier.
        next_pos: usize,
    },
    /// A release past the frontier.
    #[error("cannot release before {pos}: frontier is at {next_pos}")]
    ReleaseOutOfRange {
        /// Requested release bound.
        pos: usize,
        /// Current frontier.
        next_pos: usize,
    },
    /// A frontier read while no source is bound.
    #[error("no character source is bound (frontier read at {pos})")]
    Unbound {
        /// Requested position.
        pos: usize,
    },
    /// The source claimed to have written more characters than it was given
    /// room for.
    #[error("character source reported {returned} chars for a {available}-char slice")]
    SourceOverrun {
        /// Count the source returned.
        returned: usize,
        /// Length of the slice it was handed.
        available: usize,
    },
}

/// Failure of [`RollingCharBuffer::read_at`](crate::RollingCharBuffer::read_at).
///
/// `E` is the error type of the bound [`CharSource`](crate::CharSource); its
/// values are passed through untouched.
#[derive(Error, Debug, PartialEq)]
pub enum BufferError<E> {
    /// The call broke the addressing contract.
    #[error("contract violation: {0}")]
    Contract(#[from] ContractViolation),
    /// The character source failed while filling the buffer.
    #[error("character source failed: {0}")]
    Source(E),
}

impl<E> BufferError<E> {
    /// Returns the contract violation, if this is one.
    pub fn as_contract(&self) -> Option<&ContractViolation> {
        match self {
            Self::Contract(violation) => Some(violation),
            Self::Source(_) => None,
        }
    }
}
