//! # VirtuoHub Gate
//!
//! Deferred-intent authentication gate.
//!
//! When a guest attempts a gated action (create a post, comment, vote), the
//! calling component records what the user tried as an
//! [`Intent`](virtuohub_core::Intent), asks for the auth modal, and replays
//! the action once sign-in completes.
//!
//! ## Pieces
//!
//! - [`IntentStore`]: holds at most one pending intent and replays it exactly
//!   once, absorbing handler failures into a single failure toast
//! - [`ReplayHandlerRegistry`]: per-action lists of component-owned handlers,
//!   with identity-based unregistration through [`Registration`]
//! - [`AuthModalController`]: weakly bound opener for the sign-in modal
//! - [`SessionObserver`]: replays on the guest to signed-in edge
//! - [`AuthGate`]: the bundle passed through application context
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use virtuohub_conf::GateSettings;
//! use virtuohub_core::{AuthMode, CastVote, Intent, MessagesContainer, PollId, SessionState};
//! use virtuohub_gate::{AuthGate, ReplayHandlers};
//!
//! let gate = AuthGate::new(GateSettings::default(), Arc::new(MessagesContainer::new()));
//! let modal = Arc::new(|mode: AuthMode| assert_eq!(mode, AuthMode::SignIn));
//! gate.store().register_auth_modal_controller(&modal);
//!
//! let _poll = gate
//!     .registry()
//!     .register_replay_handlers(ReplayHandlers::new().cast_vote(|_vote| Ok(())))
//!     .into_guard();
//!
//! let observer = gate.observer(SessionState::Guest);
//! let vote = Intent::CastVote(CastVote::new(PollId::new("P1"), 1));
//! assert!(gate.run_or_defer(&SessionState::Guest, vote, || ()).is_deferred());
//!
//! observer.on_session_change(SessionState::signed_in("u1"));
//! assert!(!gate.store().has_pending_intent());
//! ```

pub mod controller;
pub mod gate;
pub mod handler;
pub mod observer;
pub mod registry;
pub mod store;

pub use controller::AuthModalController;
pub use gate::{AuthGate, Gated};
pub use handler::{AddCommentHandler, CastVoteHandler, CreatePostHandler, ReplayHandlers};
pub use observer::SessionObserver;
pub use registry::{HandlerId, Registration, RegistrationGuard, ReplayHandlerRegistry};
pub use store::{IntentStore, ReplayOutcome};

/// Re-export commonly used types
pub mod prelude {
	pub use crate::{
		AuthGate, AuthModalController, Gated, IntentStore, Registration, RegistrationGuard,
		ReplayHandlerRegistry, ReplayHandlers, ReplayOutcome, SessionObserver,
	};
}
