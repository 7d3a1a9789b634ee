//! User-visible notifications
//!
//! Toast-style one-time messages shown to the user. The gate emits a single
//! error message when a replayed action fails; caller components emit their
//! own messages for failures that happen after dispatch.
//!
//! ## Example
//!
//! ```
//! use virtuohub_core::messages::{Level, Message, MessagesContainer, Notifier};
//!
//! let container = MessagesContainer::new();
//! container.notify(Message::success("Post published"));
//! container.notify(Message::error("Action failed"));
//!
//! let messages = container.take_messages();
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[1].level, Level::Error);
//! ```

mod container;
mod level;
mod message;

pub use container::MessagesContainer;
pub use level::Level;
pub use message::Message;

/// Sink for user-visible notifications.
///
/// Implemented by whatever renders toasts in the application shell.
pub trait Notifier: Send + Sync {
	/// Show `message` to the user.
	fn notify(&self, message: Message);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
	fn notify(&self, message: Message) {
		(**self).notify(message)
	}
}
