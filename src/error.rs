//! Error types for the Ethernet mediator
//!
//! Errors are organized by kind so that callers can pick a recovery path:
//! - [`ArgumentError`]: caller errors (bad address, bad frame length, protocol
//!   misuse). Never retried internally.
//! - [`Error::NotFound`]: an exhaustive search found no device. The caller may
//!   retry after a hardware reset.
//! - [`TransportError`]: a bus or stack-delivery transaction failed. The caller
//!   may retry at its own discretion.
//!
//! The unified [`Error`] enum wraps all of them and is returned by every
//! fallible operation in the crate.

// =============================================================================
// Argument Errors
// =============================================================================

/// Caller errors: malformed input or out-of-order protocol use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArgumentError {
    /// PHY address outside 0-31
    InvalidPhyAddress,
    /// PHY register index outside 0-31
    InvalidRegister,
    /// Frame length outside the range allowed by the frame policy
    InvalidFrameLength,
    /// Command tag is not one of the defined commands
    UnknownCommand,
    /// Payload does not match the state or command it accompanies
    PayloadMismatch,
    /// Mediator is no longer bound to a live driver
    Unbound,
    /// Notification before `LowLevelInitialized`
    NotInitialized,
    /// `LowLevelInitialized` notified twice
    AlreadyInitialized,
    /// Notification after `Deinitialized`
    AlreadyDeinitialized,
}

impl core::fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ArgumentError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ArgumentError::InvalidPhyAddress => "invalid PHY address",
            ArgumentError::InvalidRegister => "invalid PHY register",
            ArgumentError::InvalidFrameLength => "invalid frame length",
            ArgumentError::UnknownCommand => "unknown command",
            ArgumentError::PayloadMismatch => "payload does not match kind",
            ArgumentError::Unbound => "mediator not bound",
            ArgumentError::NotInitialized => "driver not initialized",
            ArgumentError::AlreadyInitialized => "driver already initialized",
            ArgumentError::AlreadyDeinitialized => "driver already deinitialized",
        }
    }
}

// =============================================================================
// Transport Errors
// =============================================================================

/// Bus or stack-delivery transaction failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Bus transaction did not complete within its bound
    Timeout,
    /// Bus transaction failed
    BusFault,
    /// The network stack refused the frame
    StackRejected,
    /// The state listener failed to process a notification
    ListenerFailed,
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TransportError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TransportError::Timeout => "bus transaction timed out",
            TransportError::BusFault => "bus transaction failed",
            TransportError::StackRejected => "stack rejected frame",
            TransportError::ListenerFailed => "state listener failed",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// Coarse error classification
///
/// This is the taxonomy callers branch on: reset-and-retry for
/// [`ErrorKind::TransportFailure`], configuration-error reporting for
/// [`ErrorKind::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Malformed input or protocol misuse
    InvalidArgument,
    /// No matching device found
    NotFound,
    /// Bus or stack transaction failed
    TransportFailure,
}

/// This enum wraps all mediator errors for unified error handling.
///
/// Match on the inner error for specific handling:
/// ```ignore
/// match detect_phy_address(&mut mediator) {
///     Err(Error::NotFound) => { /* no PHY on the bus: check strapping */ }
///     Err(Error::Transport(_)) => { /* reset the bus and retry */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Invalid argument
    InvalidArgument(ArgumentError),
    /// No PHY found
    NotFound,
    /// Transport failure
    Transport(TransportError),
}

impl Error {
    /// Returns the coarse kind of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::NotFound => ErrorKind::NotFound,
            Error::Transport(_) => ErrorKind::TransportFailure,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidArgument(e) => write!(f, "invalid argument: {}", e.as_str()),
            Error::NotFound => f.write_str("not found: no PHY found"),
            Error::Transport(e) => write!(f, "transport: {}", e.as_str()),
        }
    }
}

impl core::error::Error for Error {}

// From impls for automatic conversion
impl From<ArgumentError> for Error {
    fn from(e: ArgumentError) -> Self {
        Error::InvalidArgument(e)
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Error::Transport(e)
    }
}

/// Result type alias for mediator operations
pub type Result<T> = core::result::Result<T, Error>;

// =============================================================================
// Unit Tests
// =============================================================================
