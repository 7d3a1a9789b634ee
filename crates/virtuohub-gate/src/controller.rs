//! Auth modal controller binding
//!
//! The sign-in / sign-up modal belongs to the header layer. The intent store
//! only needs a way to open it, so it keeps a weak reference to whatever
//! controller the header registered. The store never creates or destroys the
//! controller; if nothing is registered yet (early boot) or the controller
//! has been dropped, opening the modal is a silent no-op.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use virtuohub_core::AuthMode;

/// Opens the authentication modal.
pub trait AuthModalController: Send + Sync {
	/// Show the modal in `mode`.
	fn open_auth_modal(&self, mode: AuthMode);
}

impl<F> AuthModalController for F
where
	F: Fn(AuthMode) + Send + Sync,
{
	fn open_auth_modal(&self, mode: AuthMode) {
		self(mode)
	}
}

/// Single, replaceable weak binding to an [`AuthModalController`].
#[derive(Default)]
pub(crate) struct ControllerSlot {
	controller: RwLock<Option<Weak<dyn AuthModalController>>>,
}

impl ControllerSlot {
	/// Bind `controller`, replacing any previous binding.
	pub(crate) fn set<C>(&self, controller: &Arc<C>)
	where
		C: AuthModalController + 'static,
	{
		let weak: Weak<C> = Arc::downgrade(controller);
		let weak: Weak<dyn AuthModalController> = weak;
		*self.controller.write() = Some(weak);
	}

	pub(crate) fn clear(&self) {
		*self.controller.write() = None;
	}

	/// The bound controller, if one is registered and still alive.
	///
	/// The slot lock is released before the caller uses the controller.
	pub(crate) fn get(&self) -> Option<Arc<dyn AuthModalController>> {
		self.controller.read().as_ref().and_then(Weak::upgrade)
	}

	/// True when a binding exists, live or not.
	pub(crate) fn is_bound(&self) -> bool {
		self.controller.read().is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use parking_lot::Mutex;
	use rstest::rstest;

	#[derive(Default)]
	struct RecordingModal {
		opened: Mutex<Vec<AuthMode>>,
	}

	impl AuthModalController for RecordingModal {
		fn open_auth_modal(&self, mode: AuthMode) {
			self.opened.lock().push(mode);
		}
	}

	#[rstest]
	fn test_empty_slot_yields_nothing() {
		let slot = ControllerSlot::default();

		assert!(slot.get().is_none());
		assert!(!slot.is_bound());
	}

	#[rstest]
	fn test_last_registration_wins() {
		// Arrange
		let slot = ControllerSlot::default();
		let first = Arc::new(RecordingModal::default());
		let second = Arc::new(RecordingModal::default());

		// Act
		slot.set(&first);
		slot.set(&second);
		slot.get().unwrap().open_auth_modal(AuthMode::SignUp);

		// Assert
		assert!(first.opened.lock().is_empty());
		assert_eq!(*second.opened.lock(), vec![AuthMode::SignUp]);
	}

	#[rstest]
	fn test_binding_does_not_keep_controller_alive() {
		let slot = ControllerSlot::default();
		let modal = Arc::new(RecordingModal::default());
		slot.set(&modal);

		drop(modal);

		assert!(slot.is_bound());
		assert!(slot.get().is_none());
	}

	#[rstest]
	fn test_clear_removes_binding() {
		let slot = ControllerSlot::default();
		let modal = Arc::new(RecordingModal::default());
		slot.set(&modal);

		slot.clear();

		assert!(slot.get().is_none());
		assert_eq!(Arc::strong_count(&modal), 1);
	}

	#[rstest]
	fn test_closure_controller() {
		let opened = Arc::new(Mutex::new(None));
		let controller = Arc::new({
			let opened = Arc::clone(&opened);
			move |mode: AuthMode| *opened.lock() = Some(mode)
		});
		let slot = ControllerSlot::default();
		slot.set(&controller);

		slot.get().unwrap().open_auth_modal(AuthMode::SignIn);

		assert_eq!(*opened.lock(), Some(AuthMode::SignIn));
	}
}
