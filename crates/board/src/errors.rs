//! Error types for the Trello callback domain.
//!
//! Only [`PayloadError`] and [`ConfigurationError`] are ever visible to the
//! webhook caller. [`MembershipError`] is produced by adapter implementations
//! and stops at the dispatch boundary: it is logged and then dropped, so the
//! upstream service always receives an acknowledgement for a valid delivery.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Inbound payload
// ---------------------------------------------------------------------------

/// Reasons an inbound webhook body is rejected before any side effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// The body is empty or is not a JSON object of the expected shape.
    #[error("Malformed webhook body: {message}")]
    Malformed {
        /// Parser diagnostic.
        message: String,
    },

    /// A required field is absent or empty.
    #[error("Missing required field '{field}'")]
    MissingField {
        /// Dotted path of the field within the payload (e.g. `"model.id"`).
        field: &'static str,
    },
}

// ---------------------------------------------------------------------------
// Outbound membership calls
// ---------------------------------------------------------------------------

/// Failure of a single add-member or remove-member call.
///
/// Terminal for that call: nothing retries it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MembershipError {
    /// The request never produced an HTTP response (DNS, connect, TLS, timeout).
    #[error("Request to board API failed: {message}")]
    Transport {
        /// Underlying client diagnostic.
        message: String,
    },

    /// The board API answered with a non-success status.
    #[error("Board API rejected the request with status {status}: {body}")]
    Rejected {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, kept verbatim for the log entry.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// The receiver's configuration is unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A credential needed to call the board API is not set.
    #[error("Missing credential: {name}")]
    MissingCredential {
        /// Name of the environment variable or config key.
        name: &'static str,
    },

    /// A configuration value is present but invalid.
    #[error("Configuration error: {message}")]
    Invalid {
        /// Description of the configuration problem.
        message: String,
    },
}
