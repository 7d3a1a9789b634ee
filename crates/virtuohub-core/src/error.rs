//! Error types shared across the gate and its callers

use thiserror::Error;

/// Result type returned by replay handlers
pub type HandlerResult = Result<(), HandlerError>;

/// Failure raised synchronously by a replay handler.
///
/// The intent store absorbs these: they are logged and turned into a single
/// user-facing notification, never returned to the caller of a replay.
#[derive(Debug, Error)]
pub enum HandlerError {
	/// The handler refused the payload
	#[error("handler rejected payload: {0}")]
	Rejected(String),

	/// The payload referred to something the handler cannot act on
	#[error("invalid {field}: {reason}")]
	Invalid {
		/// Offending payload field
		field: &'static str,
		/// Why it was refused
		reason: String,
	},

	/// A synchronous backend call failed
	#[error(transparent)]
	Backend(#[from] BackendError),

	/// The handler panicked during dispatch
	#[error("handler panicked: {0}")]
	Panicked(String),
}

impl HandlerError {
	/// Shorthand for [`HandlerError::Rejected`].
	pub fn rejected(reason: impl Into<String>) -> Self {
		Self::Rejected(reason.into())
	}
}

/// Failure reported by an external action endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
	/// The request never reached the backend
	#[error("network error: {0}")]
	Network(String),

	/// The backend answered with an error status
	#[error("backend returned {status}: {message}")]
	Status {
		/// HTTP-like status code
		status: u16,
		/// Message from the backend
		message: String,
	},

	/// The session was not accepted
	#[error("not authenticated")]
	Unauthorized,
}

/// Errors produced while parsing or transporting intents
#[derive(Debug, Error)]
pub enum IntentError {
	/// Unknown action kind name
	#[error("unknown action kind: {0}")]
	UnknownAction(String),

	/// Unknown auth modal mode
	#[error("unknown auth mode: {0}")]
	UnknownAuthMode(String),

	/// The serialized intent could not be encoded or decoded
	#[error("malformed intent: {0}")]
	Malformed(#[source] serde_json::Error),
}
