//! # VirtuoHub
//!
//! Deferred-intent authentication gate for the VirtuoHub community
//! application.
//!
//! Guests may browse freely, but creating a post, commenting and voting need
//! a signed-in user. Instead of losing what the guest was doing, the gate
//! records it as an intent, opens the sign-in modal, and replays the action
//! through the component that captured it once authentication succeeds.
//!
//! ## Feature Flags
//!
//! ### Presets
//!
//! - `minimal` - Intent store, replay registry and auth modal binding
//! - `standard` - Adds settings loading and the gated components
//! - `full` (default) - Everything
//!
//! ### Fine-grained Control
//!
//! - `gate` - [`gate`] module, plus [`GateSettings`] to configure it
//! - `conf` - [`conf`] module (TOML and environment settings)
//! - `pages` - [`pages`] module (post composer, comment box, poll widget)
//!
//! ## Quick Example
//!
//! ```rust
//! # #[cfg(feature = "full")]
//! # {
//! use std::sync::Arc;
//! use virtuohub::prelude::*;
//!
//! let messages = MessagesContainer::new();
//! let gate = AuthGate::new(GateSettings::default(), Arc::new(messages.clone()));
//! let observer = gate.observer(SessionState::Guest);
//!
//! let poll = PollWidget::mount(
//!     &gate,
//!     PollId::new("P1"),
//!     ["Yes", "No"],
//!     Arc::new(InMemoryBackend::new()),
//! );
//!
//! // A guest votes: the vote is deferred until sign-in.
//! assert!(poll.vote(&SessionState::Guest, 0).unwrap().is_deferred());
//!
//! // The session provider reports a sign-in: the vote is replayed.
//! observer.on_session_change(SessionState::signed_in("u1"));
//! assert_eq!(poll.my_vote(), Some(0));
//! # }
//! ```

pub mod core;

#[cfg(feature = "conf")]
pub mod conf;
#[cfg(feature = "gate")]
pub mod gate;
#[cfg(feature = "pages")]
pub mod pages;

pub use virtuohub_core::{
	ActionKind, AddComment, AuthMode, BackendError, CastVote, CreatePost, HandlerError,
	HandlerResult, Intent, IntentError, Level, Message, MessagesContainer, Notifier, PollId,
	PostId, PostSubtype, SessionState, UserId,
};

#[cfg(feature = "conf")]
pub use virtuohub_conf::ConfigError;

#[cfg(any(feature = "gate", feature = "conf"))]
pub use virtuohub_conf::GateSettings;

#[cfg(feature = "gate")]
pub use virtuohub_gate::{
	AuthGate, AuthModalController, Gated, IntentStore, Registration, RegistrationGuard,
	ReplayHandlerRegistry, ReplayHandlers, ReplayOutcome, SessionObserver,
};

#[cfg(feature = "pages")]
pub use virtuohub_pages::{
	ActionBackend, CommentBox, InMemoryBackend, PollWidget, PostComposer,
};

/// Re-export commonly used types
pub mod prelude {
	pub use virtuohub_core::prelude::*;

	#[cfg(any(feature = "gate", feature = "conf"))]
	pub use virtuohub_conf::GateSettings;

	#[cfg(feature = "gate")]
	pub use virtuohub_gate::prelude::*;

	#[cfg(feature = "pages")]
	pub use crate::{ActionBackend, CommentBox, InMemoryBackend, PollWidget, PostComposer};
}
