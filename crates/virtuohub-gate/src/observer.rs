//! Session observer
//!
//! Watches session state transitions and replays the pending intent when a
//! guest signs in. Sign-in providers often report the same signed-in state
//! more than once (token refresh, tab focus), so only the `Guest -> SignedIn`
//! edge triggers a replay.

use parking_lot::Mutex;
use tracing::debug;
use virtuohub_core::SessionState;

use crate::store::{IntentStore, ReplayOutcome};

/// Replays the pending intent on the sign-in edge.
pub struct SessionObserver {
	store: IntentStore,
	last: Mutex<SessionState>,
	enabled: bool,
}

impl SessionObserver {
	/// Observe transitions starting from `initial`.
	///
	/// With `enabled` off the observer only tracks state; callers then call
	/// [`IntentStore::replay_intent`] themselves.
	pub fn new(store: IntentStore, initial: SessionState, enabled: bool) -> Self {
		Self {
			store,
			last: Mutex::new(initial),
			enabled,
		}
	}

	/// Record the provider's current session state.
	///
	/// Returns the replay outcome when this call crossed the sign-in edge and
	/// replay is enabled, `None` otherwise. Signing out leaves the pending
	/// intent untouched.
	pub fn on_session_change(&self, next: SessionState) -> Option<ReplayOutcome> {
		let signed_in_now = {
			let mut last = self.last.lock();
			let edge = !last.is_signed_in() && next.is_signed_in();
			*last = next;
			edge
		};

		if !signed_in_now {
			return None;
		}
		if !self.enabled {
			debug!("signed in; automatic replay disabled");
			return None;
		}
		debug!("signed in; replaying pending intent");
		Some(self.store.replay_intent())
	}

	/// The most recently observed state.
	pub fn session(&self) -> SessionState {
		self.last.lock().clone()
	}
}

impl std::fmt::Debug for SessionObserver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionObserver")
			.field("session", &*self.last.lock())
			.field("enabled", &self.enabled)
			.finish()
	}
}
