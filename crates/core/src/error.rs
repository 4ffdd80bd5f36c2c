//! Error types shared across the profile administration layers.

/// A single failed field rule, surfaced inline next to the field.
///
/// Validation failures never reach the network; they are produced and
/// consumed entirely on the client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    /// Field name as it appears on the wire (e.g. `first_name`).
    pub field: &'static str,
    /// Human-readable message, shown verbatim next to the field.
    pub message: &'static str,
}

/// An error originating from the backend service or the transport
/// connecting to it.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    /// The backend answered with a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The request itself failed (connection refused, DNS, timeout, or
    /// an unreadable response body).
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Outcome of a rejected form submission.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// One or more field rules failed; nothing was transmitted.
    #[error("Validation failed on {} field(s)", .0.len())]
    Invalid(Vec<FieldError>),

    /// The backend rejected the write (or the transport failed). The
    /// form keeps its entered values so nothing is lost.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
