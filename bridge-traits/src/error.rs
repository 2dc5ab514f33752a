use thiserror::Error;

/// Errors reported across the native boundary.
///
/// Native adapters translate whatever their platform produces into one of
/// these variants. The facade never reinterprets them; it wraps them and
/// hands them to the caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The native module (or one of its capabilities) is not reachable,
    /// e.g. the playback service is not bound yet.
    #[error("Bridge capability not available: {0}")]
    NotAvailable(String),

    /// The native player refused the command.
    #[error("Native player rejected the command [{code}]: {message}")]
    Rejected { code: String, message: String },

    /// The native player answered with a value outside the contract.
    #[error("Invalid reply from native player: {0}")]
    InvalidReply(String),

    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),
}

impl BridgeError {
    /// Shorthand for [`BridgeError::Rejected`].
    pub fn rejected(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Authority-defined error code, when the native side supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            BridgeError::Rejected { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
