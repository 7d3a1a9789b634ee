//! # VirtuoHub Core
//!
//! Shared types for the VirtuoHub deferred-intent authentication gate.
//!
//! A guest who tries to create a post, comment, or vote is asked to sign in
//! first. The action they attempted is captured as an [`Intent`] so it can be
//! replayed once authentication succeeds. This crate holds the data that
//! flows through that round trip:
//!
//! - **Intents**: [`Intent`] and its strongly typed payloads ([`CreatePost`],
//!   [`AddComment`], [`CastVote`])
//! - **Auth**: [`AuthMode`] for the sign-in surface and [`SessionState`] as
//!   reported by the external session provider
//! - **Messages**: user-visible notifications ([`Message`], [`Level`]) and the
//!   [`Notifier`] sink that displays them
//! - **Errors**: [`HandlerError`], [`BackendError`] and [`IntentError`]
//!
//! ## Example
//!
//! ```
//! use virtuohub_core::{ActionKind, CastVote, Intent, PollId};
//!
//! let intent = Intent::CastVote(CastVote::new(PollId::new("P1"), 1));
//! assert_eq!(intent.action(), ActionKind::CastVote);
//!
//! let json = intent.to_json().unwrap();
//! assert_eq!(json, r#"{"action":"cast_vote","data":{"pollId":"P1","optionIndex":1}}"#);
//! ```

pub mod auth;
pub mod error;
pub mod intent;
pub mod messages;

pub use auth::{AuthMode, SessionState, UserId};
pub use error::{BackendError, HandlerError, HandlerResult, IntentError};
pub use intent::{
	ActionKind, AddComment, CastVote, CreatePost, Intent, PollId, PostId, PostSubtype,
};
pub use messages::{Level, Message, MessagesContainer, Notifier};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::auth::*;
	pub use crate::error::*;
	pub use crate::intent::*;
	pub use crate::messages::*;
}
