//! Application-scoped auth gate
//!
//! [`AuthGate`] bundles the intent store, its handler registry and the
//! notifier into the one object a page root creates and hands to its
//! components through context.

use std::sync::Arc;

use tracing::debug;
use virtuohub_conf::GateSettings;
use virtuohub_core::{Intent, Notifier, SessionState};

use crate::observer::SessionObserver;
use crate::registry::ReplayHandlerRegistry;
use crate::store::IntentStore;

/// Result of [`AuthGate::run_or_defer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<R> {
	/// The user was signed in and the action ran immediately
	Performed(R),
	/// The user was a guest; the intent was recorded and auth requested
	Deferred,
}

impl<R> Gated<R> {
	pub fn is_deferred(&self) -> bool {
		matches!(self, Gated::Deferred)
	}

	/// The action's result, if it ran.
	pub fn performed(self) -> Option<R> {
		match self {
			Gated::Performed(result) => Some(result),
			Gated::Deferred => None,
		}
	}
}

impl<T, E> Gated<Result<T, E>> {
	/// Move a failed action's error outward, like [`Option::transpose`].
	pub fn transpose(self) -> Result<Gated<T>, E> {
		match self {
			Gated::Performed(Ok(value)) => Ok(Gated::Performed(value)),
			Gated::Performed(Err(err)) => Err(err),
			Gated::Deferred => Ok(Gated::Deferred),
		}
	}
}

/// Store, registry and notifier for one application root.
///
/// Cloning yields another handle to the same gate.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use virtuohub_conf::GateSettings;
/// use virtuohub_core::{CastVote, Intent, MessagesContainer, PollId, SessionState};
/// use virtuohub_gate::{AuthGate, Gated};
///
/// let gate = AuthGate::new(GateSettings::default(), Arc::new(MessagesContainer::new()));
/// let vote = CastVote::new(PollId::new("P1"), 1);
///
/// let result = gate.run_or_defer(&SessionState::Guest, Intent::CastVote(vote.clone()), || "sent");
/// assert_eq!(result, Gated::Deferred);
/// assert!(gate.store().has_pending_intent());
///
/// let result = gate.run_or_defer(&SessionState::signed_in("u1"), Intent::CastVote(vote), || "sent");
/// assert_eq!(result, Gated::Performed("sent"));
/// ```
#[derive(Clone)]
pub struct AuthGate {
	store: IntentStore,
	settings: Arc<GateSettings>,
}

impl AuthGate {
	/// Create a gate with a fresh registry.
	pub fn new(settings: GateSettings, notifier: Arc<dyn Notifier>) -> Self {
		let store = IntentStore::new(ReplayHandlerRegistry::new(), notifier, &settings);
		Self {
			store,
			settings: Arc::new(settings),
		}
	}

	pub fn store(&self) -> &IntentStore {
		&self.store
	}

	pub fn registry(&self) -> &ReplayHandlerRegistry {
		self.store.registry()
	}

	pub fn settings(&self) -> &GateSettings {
		&self.settings
	}

	pub fn notifier(&self) -> &Arc<dyn Notifier> {
		self.store.notifier()
	}

	/// A session observer for this gate, honouring `replay_on_sign_in`.
	pub fn observer(&self, initial: SessionState) -> SessionObserver {
		SessionObserver::new(self.store.clone(), initial, self.settings.replay_on_sign_in)
	}

	/// Run a gated action.
	///
	/// Signed in: `perform` runs now and its result is returned. Guest: the
	/// intent replaces any pending one, the auth modal is requested in the
	/// configured default mode and `perform` is not called.
	pub fn run_or_defer<R, F>(&self, session: &SessionState, intent: Intent, perform: F) -> Gated<R>
	where
		F: FnOnce() -> R,
	{
		if session.is_signed_in() {
			return Gated::Performed(perform());
		}
		debug!(action = %intent.action(), "guest action deferred until sign-in");
		self.store.set_intent(intent);
		self.store.request_auth(self.settings.default_auth_mode);
		Gated::Deferred
	}
}

impl std::fmt::Debug for AuthGate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AuthGate")
			.field("store", &self.store)
			.field("settings", &self.settings)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use parking_lot::Mutex;
	use rstest::rstest;
	use virtuohub_core::{AuthMode, CreatePost, MessagesContainer};

	fn post() -> Intent {
		Intent::CreatePost(CreatePost::thread("general", "Hello", "First post"))
	}

	#[rstest]
	#[case(AuthMode::SignIn)]
	#[case(AuthMode::SignUp)]
	fn test_guest_defers_and_opens_default_mode(#[case] mode: AuthMode) {
		// Arrange
		let gate = AuthGate::new(
			GateSettings {
				default_auth_mode: mode,
				..GateSettings::default()
			},
			Arc::new(MessagesContainer::new()),
		);
		let opened = Arc::new(Mutex::new(Vec::new()));
		let modal = Arc::new({
			let opened = Arc::clone(&opened);
			move |m: AuthMode| opened.lock().push(m)
		});
		gate.store().register_auth_modal_controller(&modal);
		let mut ran = false;

		// Act
		let result = gate.run_or_defer(&SessionState::Guest, post(), || ran = true);

		// Assert
		assert!(result.is_deferred());
		assert!(!ran);
		assert_eq!(gate.store().intent(), Some(post()));
		assert_eq!(*opened.lock(), vec![mode]);
	}

	#[rstest]
	fn test_signed_in_runs_immediately() {
		let gate = AuthGate::new(GateSettings::default(), Arc::new(MessagesContainer::new()));

		let result = gate.run_or_defer(&SessionState::signed_in("u1"), post(), || 42);

		assert_eq!(result.performed(), Some(42));
		assert!(!gate.store().has_pending_intent());
	}

	#[rstest]
	fn test_observer_follows_settings() {
		let gate = AuthGate::new(
			GateSettings {
				replay_on_sign_in: false,
				..GateSettings::default()
			},
			Arc::new(MessagesContainer::new()),
		);
		gate.store().set_intent(post());

		let observer = gate.observer(SessionState::Guest);
		observer.on_session_change(SessionState::signed_in("u1"));

		assert!(gate.store().has_pending_intent());
	}

	#[rstest]
	#[case(Gated::Performed(Ok(1)), Ok(Gated::Performed(1)))]
	#[case(Gated::Performed(Err("down")), Err("down"))]
	#[case(Gated::Deferred, Ok(Gated::Deferred))]
	fn test_transpose(
		#[case] gated: Gated<Result<i32, &'static str>>,
		#[case] expected: Result<Gated<i32>, &'static str>,
	) {
		assert_eq!(gated.transpose(), expected);
	}

	#[rstest]
	fn test_clones_share_state() {
		let gate = AuthGate::new(GateSettings::default(), Arc::new(MessagesContainer::new()));
		let other = gate.clone();

		other.store().set_intent(post());

		assert!(gate.store().has_pending_intent());
	}
}
