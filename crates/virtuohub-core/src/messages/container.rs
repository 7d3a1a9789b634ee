//! In-memory notification sink

use std::sync::Arc;

use parking_lot::Mutex;

use super::Notifier;
use super::level::Level;
use super::message::Message;

/// Collects notifications until the shell drains them.
///
/// Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct MessagesContainer {
	messages: Arc<Mutex<Vec<Message>>>,
}

impl MessagesContainer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Snapshot of queued messages without removing them.
	pub fn messages(&self) -> Vec<Message> {
		self.messages.lock().clone()
	}

	/// Remove and return all queued messages.
	pub fn take_messages(&self) -> Vec<Message> {
		std::mem::take(&mut *self.messages.lock())
	}

	/// Number of queued messages at `level`.
	pub fn count_level(&self, level: Level) -> usize {
		self.messages
			.lock()
			.iter()
			.filter(|m| m.level == level)
			.count()
	}

	pub fn len(&self) -> usize {
		self.messages.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.lock().is_empty()
	}

	pub fn clear(&self) {
		self.messages.lock().clear();
	}
}

impl Notifier for MessagesContainer {
	fn notify(&self, message: Message) {
		self.messages.lock().push(message);
	}
}
