//! # VirtuoHub Pages
//!
//! Components whose actions require a signed-in user.
//!
//! Each component is mounted against the page's [`AuthGate`] and an
//! [`ActionBackend`]. Mounting registers the component's replay handler;
//! dropping the component unregisters it. A guest's action is captured as an
//! intent and replayed by the same component after sign-in.
//!
//! - [`PostComposer`]: threads and polls (`create_post`)
//! - [`CommentBox`]: comments on one post (`add_comment`)
//! - [`PollWidget`]: votes on one poll (`cast_vote`)
//!
//! Backend failures are shown to the user by the component itself. Invalid
//! payloads discovered during a replay are returned to the intent store,
//! which reports them with its generic failure toast.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use virtuohub_conf::GateSettings;
//! use virtuohub_core::{MessagesContainer, PollId, SessionState};
//! use virtuohub_gate::AuthGate;
//! use virtuohub_pages::{InMemoryBackend, PollWidget};
//!
//! let gate = AuthGate::new(GateSettings::default(), Arc::new(MessagesContainer::new()));
//! let poll = PollWidget::mount(
//!     &gate,
//!     PollId::new("P1"),
//!     ["Yes", "No"],
//!     Arc::new(InMemoryBackend::new()),
//! );
//!
//! assert!(poll.vote(&SessionState::Guest, 1).unwrap().is_deferred());
//! gate.store().replay_intent();
//! assert_eq!(poll.my_vote(), Some(1));
//! ```
//!
//! [`AuthGate`]: virtuohub_gate::AuthGate

pub mod backend;
pub mod comment;
pub mod composer;
mod feedback;
pub mod poll;

pub use backend::{ActionBackend, BackendCall, BackendResult, InMemoryBackend};
pub use comment::CommentBox;
pub use composer::{MIN_POLL_OPTIONS, PostComposer};
pub use poll::PollWidget;
