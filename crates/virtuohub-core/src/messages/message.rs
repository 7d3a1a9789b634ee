use serde::{Deserialize, Serialize};

use super::level::Level;

/// A single toast message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
	pub level: Level,
	pub text: String,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub tags: Vec<String>,
}

impl Message {
	/// Create a new message
	///
	/// # Examples
	///
	/// ```
	/// use virtuohub_core::{Level, Message};
	///
	/// let msg = Message::new(Level::Success, "Saved successfully!");
	/// assert_eq!(msg.level, Level::Success);
	/// ```
	pub fn new(level: Level, text: impl Into<String>) -> Self {
		Self {
			level,
			text: text.into(),
			tags: Vec::new(),
		}
	}

	pub fn debug(text: impl Into<String>) -> Self {
		Self::new(Level::Debug, text)
	}

	pub fn info(text: impl Into<String>) -> Self {
		Self::new(Level::Info, text)
	}

	pub fn success(text: impl Into<String>) -> Self {
		Self::new(Level::Success, text)
	}

	pub fn warning(text: impl Into<String>) -> Self {
		Self::new(Level::Warning, text)
	}

	pub fn error(text: impl Into<String>) -> Self {
		Self::new(Level::Error, text)
	}

	/// Attach tags used by the shell to style or group the toast.
	pub fn with_tags<I, S>(mut self, tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.tags = tags.into_iter().map(Into::into).collect();
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(Message::debug("d"), Level::Debug)]
	#[case(Message::info("i"), Level::Info)]
	#[case(Message::success("s"), Level::Success)]
	#[case(Message::warning("w"), Level::Warning)]
	#[case(Message::error("e"), Level::Error)]
	fn test_constructors_set_level(#[case] message: Message, #[case] level: Level) {
		assert_eq!(message.level, level);
		assert!(message.tags.is_empty());
	}

	#[rstest]
	fn test_with_tags() {
		let msg = Message::error("Vote failed").with_tags(["poll", "replay"]);
		assert_eq!(msg.tags, vec!["poll".to_string(), "replay".to_string()]);
	}
}
