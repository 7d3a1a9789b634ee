//! Intent store
//!
//! Single source of truth for "what the user was trying to do before we
//! interrupted them to authenticate".
//!
//! ## Lifecycle
//!
//! ```text
//! EMPTY   --set_intent-->                PENDING
//! PENDING --replay_intent-->             EMPTY   (handlers succeed or fail)
//! PENDING --clear_intent-->              EMPTY
//! PENDING --set_intent (overwrite)-->    PENDING (payload replaced)
//! ```
//!
//! A replay consumes the intent exactly once. The intent is taken out of the
//! store before any handler runs, so a second replay that arrives while the
//! first is still dispatching (double sign-in events, or a handler that calls
//! back into the store) finds nothing to do.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use virtuohub_conf::GateSettings;
//! use virtuohub_core::{CastVote, Intent, MessagesContainer, PollId};
//! use virtuohub_gate::{IntentStore, ReplayHandlerRegistry, ReplayHandlers, ReplayOutcome};
//!
//! let registry = ReplayHandlerRegistry::new();
//! let store = IntentStore::new(
//!     registry.clone(),
//!     Arc::new(MessagesContainer::new()),
//!     &GateSettings::default(),
//! );
//! let _registration = registry.register_replay_handlers(
//!     ReplayHandlers::new().cast_vote(|vote| {
//!         assert_eq!(vote.option_index, 1);
//!         Ok(())
//!     }),
//! );
//!
//! store.set_intent(Intent::CastVote(CastVote::new(PollId::new("P1"), 1)));
//! let outcome = store.replay_intent();
//!
//! assert!(matches!(outcome, ReplayOutcome::Dispatched { invoked: 1, failed: 0, .. }));
//! assert!(store.intent().is_none());
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::{debug, error, warn};
use virtuohub_conf::GateSettings;
use virtuohub_core::{
	ActionKind, AuthMode, CastVote, HandlerError, HandlerResult, Intent, IntentError, Message,
	Notifier, PollId,
};

use crate::controller::{AuthModalController, ControllerSlot};
use crate::handler::ReplayHandlers;
use crate::registry::{BoundHandler, Registration, ReplayHandlerRegistry};

/// What a call to [`IntentStore::replay_intent`] did.
///
/// Purely informational: handler failures are absorbed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayOutcome {
	/// No intent was pending
	NoIntent,
	/// Another replay was already dispatching; this call did nothing
	Skipped,
	/// The pending intent was dispatched and cleared
	Dispatched {
		action: ActionKind,
		/// Handlers invoked, zero when none were registered
		invoked: usize,
		/// Handlers that failed synchronously
		failed: usize,
	},
}

impl ReplayOutcome {
	/// True when at least one handler failed.
	pub fn has_failures(&self) -> bool {
		matches!(self, ReplayOutcome::Dispatched { failed, .. } if *failed > 0)
	}
}

struct StoreInner {
	intent: Mutex<Option<Intent>>,
	registry: ReplayHandlerRegistry,
	controller: ControllerSlot,
	notifier: Arc<dyn Notifier>,
	failure_message: String,
	replaying: AtomicBool,
}

/// Holds at most one pending [`Intent`] and replays it through the registry.
///
/// Cloning yields another handle to the same store.
#[derive(Clone)]
pub struct IntentStore {
	inner: Arc<StoreInner>,
}

impl IntentStore {
	/// Create a store dispatching through `registry` and reporting replay
	/// failures to `notifier`.
	pub fn new(
		registry: ReplayHandlerRegistry,
		notifier: Arc<dyn Notifier>,
		settings: &GateSettings,
	) -> Self {
		Self {
			inner: Arc::new(StoreInner {
				intent: Mutex::new(None),
				registry,
				controller: ControllerSlot::default(),
				notifier,
				failure_message: settings.failure_message.clone(),
				replaying: AtomicBool::new(false),
			}),
		}
	}

	/// Replace the pending intent unconditionally. `None` clears it.
	pub fn set_intent(&self, intent: impl Into<Option<Intent>>) {
		let intent = intent.into();
		match &intent {
			Some(next) => debug!(action = %next.action(), "intent pending"),
			None => debug!("intent cleared"),
		}
		*self.inner.intent.lock() = intent;
	}

	/// Drop the pending intent, if any. Idempotent.
	pub fn clear_intent(&self) {
		self.set_intent(None);
	}

	/// Copy of the pending intent.
	pub fn intent(&self) -> Option<Intent> {
		self.inner.intent.lock().clone()
	}

	pub fn has_pending_intent(&self) -> bool {
		self.inner.intent.lock().is_some()
	}

	/// Dispatch the pending intent to every matching handler, in
	/// registration order, then leave the store empty.
	///
	/// Handler failures (errors and panics) are logged and produce exactly one
	/// failure notification per replay. They never reach the caller.
	pub fn replay_intent(&self) -> ReplayOutcome {
		if self.inner.replaying.swap(true, Ordering::AcqRel) {
			warn!("replay requested while another replay is dispatching; ignored");
			return ReplayOutcome::Skipped;
		}
		let _replaying = ReplayingFlag(&self.inner.replaying);

		let Some(intent) = self.inner.intent.lock().take() else {
			debug!("replay requested with no pending intent");
			return ReplayOutcome::NoIntent;
		};
		let action = intent.action();

		let handlers = self.inner.registry.bind(&intent);
		let invoked = handlers.len();
		let mut failed = 0;
		for handler in &handlers {
			if let Err(err) = self.invoke(handler) {
				failed += 1;
				error!(action = %action, error = %err, "replay handler failed");
			}
		}

		if failed > 0 {
			self.inner.notifier.notify(
				Message::error(self.inner.failure_message.as_str())
					.with_tags(["replay", action.as_str()]),
			);
		}
		debug!(action = %action, invoked, failed, "intent replayed");
		ReplayOutcome::Dispatched {
			action,
			invoked,
			failed,
		}
	}

	fn invoke(&self, handler: &BoundHandler<'_>) -> HandlerResult {
		match panic::catch_unwind(AssertUnwindSafe(|| handler())) {
			Ok(result) => result,
			Err(payload) => Err(HandlerError::Panicked(panic_message(payload.as_ref()))),
		}
	}

	/// Bind the auth modal controller, replacing any previous one.
	///
	/// Only a weak reference is kept; the caller owns the controller.
	pub fn register_auth_modal_controller<C>(&self, controller: &Arc<C>)
	where
		C: AuthModalController + 'static,
	{
		debug!("auth modal controller registered");
		self.inner.controller.set(controller);
	}

	/// Remove the controller binding.
	pub fn unregister_auth_modal_controller(&self) {
		self.inner.controller.clear();
	}

	/// Open the auth modal in `mode` if a live controller is registered.
	///
	/// Returns whether the modal was asked to open. Without a controller this
	/// is a silent no-op.
	pub fn request_auth(&self, mode: AuthMode) -> bool {
		let Some(controller) = self.inner.controller.get() else {
			if self.inner.controller.is_bound() {
				warn!(mode = %mode, "auth modal controller was dropped; auth request ignored");
			} else {
				debug!(mode = %mode, "no auth modal controller registered; auth request ignored");
			}
			return false;
		};
		debug!(mode = %mode, "opening auth modal");
		controller.open_auth_modal(mode);
		true
	}

	/// [`Self::request_auth`] with the default `signin` mode.
	pub fn request_sign_in(&self) -> bool {
		self.request_auth(AuthMode::default())
	}

	/// Register handlers on this store's registry.
	pub fn register_replay_handlers(&self, handlers: ReplayHandlers) -> Registration {
		self.inner.registry.register_replay_handlers(handlers)
	}

	/// Register a vote handler keyed to `poll_id` on this store's registry.
	pub fn register_vote_handler_for<F>(&self, poll_id: PollId, handler: F) -> Registration
	where
		F: Fn(&CastVote) -> HandlerResult + Send + Sync + 'static,
	{
		self.inner.registry.register_vote_handler_for(poll_id, handler)
	}

	/// The registry this store dispatches through.
	pub fn registry(&self) -> &ReplayHandlerRegistry {
		&self.inner.registry
	}

	/// The sink replay failures are reported to.
	pub fn notifier(&self) -> &Arc<dyn Notifier> {
		&self.inner.notifier
	}

	/// Serialize the pending intent, e.g. before a full-page auth redirect.
	pub fn export_intent(&self) -> Result<Option<String>, IntentError> {
		self.inner
			.intent
			.lock()
			.as_ref()
			.map(Intent::to_json)
			.transpose()
	}

	/// Install an intent previously produced by [`Self::export_intent`].
	///
	/// Malformed input leaves the store untouched.
	pub fn restore_intent(&self, json: &str) -> Result<(), IntentError> {
		let intent = Intent::from_json(json)?;
		self.set_intent(intent);
		Ok(())
	}
}

impl std::fmt::Debug for IntentStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("IntentStore")
			.field("intent", &*self.inner.intent.lock())
			.field("registry", &self.inner.registry)
			.field("controller_bound", &self.inner.controller.is_bound())
			.finish()
	}
}

/// Resets the in-flight flag when a replay ends, including by unwinding.
struct ReplayingFlag<'a>(&'a AtomicBool);

impl Drop for ReplayingFlag<'_> {
	fn drop(&mut self) {
		self.0.store(false, Ordering::Release);
	}
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&str>() {
		(*s).to_string()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"non-string panic payload".to_string()
	}
}
