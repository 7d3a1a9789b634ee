//! Authentication surface types
//!
//! The gate never speaks an auth protocol. It only needs to know which entry
//! mode to open the sign-in surface with, and whether the external session
//! provider currently reports a signed-in user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntentError;

/// Entry mode of the authentication modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AuthMode {
	#[default]
	#[serde(rename = "signin")]
	SignIn,
	#[serde(rename = "signup")]
	SignUp,
}

impl AuthMode {
	/// Returns the mode name passed to the modal.
	///
	/// # Examples
	///
	/// ```
	/// use virtuohub_core::AuthMode;
	///
	/// assert_eq!(AuthMode::SignIn.as_str(), "signin");
	/// assert_eq!(AuthMode::SignUp.as_str(), "signup");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			AuthMode::SignIn => "signin",
			AuthMode::SignUp => "signup",
		}
	}
}

impl fmt::Display for AuthMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for AuthMode {
	type Err = IntentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"signin" => Ok(AuthMode::SignIn),
			"signup" => Ok(AuthMode::SignUp),
			other => Err(IntentError::UnknownAuthMode(other.to_string())),
		}
	}
}

/// Identifier of an authenticated user, as issued by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for UserId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Snapshot of the session provider's state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
	#[default]
	Guest,
	SignedIn { user_id: UserId },
}

impl SessionState {
	/// Session for a signed-in user.
	pub fn signed_in(user_id: impl Into<String>) -> Self {
		SessionState::SignedIn {
			user_id: UserId::new(user_id),
		}
	}

	pub fn is_signed_in(&self) -> bool {
		matches!(self, SessionState::SignedIn { .. })
	}

	/// The signed-in user, if any.
	pub fn user_id(&self) -> Option<&UserId> {
		match self {
			SessionState::SignedIn { user_id } => Some(user_id),
			SessionState::Guest => None,
		}
	}
}
