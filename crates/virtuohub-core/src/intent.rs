//! Deferred user actions
//!
//! An [`Intent`] is a gated action a guest attempted before signing in. Each
//! variant carries its own payload type, so a replay handler receives exactly
//! the fields it needs instead of a free-form bag.
//!
//! ## Wire form
//!
//! Intents serialize adjacently tagged, with camelCase payload fields:
//!
//! ```text
//! {"action": "add_comment", "data": {"postId": "p-9", "commentText": "nice", "commentImages": []}}
//! ```
//!
//! The JSON form is what gets stashed when an intent has to survive a
//! full-page sign-in redirect.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntentError;

/// Identifier of a feed post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
	/// Create a post id from any string-like value.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Borrow the raw id.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PostId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for PostId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

/// Identifier of a poll.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PollId(String);

impl PollId {
	/// Create a poll id from any string-like value.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Borrow the raw id.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for PollId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for PollId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

/// The kind of a gated action.
///
/// Replay handlers are registered per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
	CreatePost,
	AddComment,
	CastVote,
}

impl ActionKind {
	/// All action kinds, in declaration order.
	pub const ALL: [ActionKind; 3] = [
		ActionKind::CreatePost,
		ActionKind::AddComment,
		ActionKind::CastVote,
	];

	/// Returns the snake_case name used on the wire.
	///
	/// # Examples
	///
	/// ```
	/// use virtuohub_core::ActionKind;
	///
	/// assert_eq!(ActionKind::CreatePost.as_str(), "create_post");
	/// assert_eq!(ActionKind::CastVote.as_str(), "cast_vote");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			ActionKind::CreatePost => "create_post",
			ActionKind::AddComment => "add_comment",
			ActionKind::CastVote => "cast_vote",
		}
	}
}

impl fmt::Display for ActionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ActionKind {
	type Err = IntentError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"create_post" => Ok(ActionKind::CreatePost),
			"add_comment" => Ok(ActionKind::AddComment),
			"cast_vote" => Ok(ActionKind::CastVote),
			other => Err(IntentError::UnknownAction(other.to_string())),
		}
	}
}

/// Whether a new post is a discussion thread or a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostSubtype {
	#[default]
	Thread,
	Poll,
}

/// Payload for creating a feed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
	pub category: String,
	pub subtype: PostSubtype,
	pub title: String,
	pub body: String,
	/// Option labels when `subtype` is [`PostSubtype::Poll`]; empty for threads.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub poll_options: Vec<String>,
}

impl CreatePost {
	/// A discussion thread in `category`.
	pub fn thread(
		category: impl Into<String>,
		title: impl Into<String>,
		body: impl Into<String>,
	) -> Self {
		Self {
			category: category.into(),
			subtype: PostSubtype::Thread,
			title: title.into(),
			body: body.into(),
			poll_options: Vec::new(),
		}
	}

	/// A poll in `category` offering `options`.
	pub fn poll<I, S>(
		category: impl Into<String>,
		title: impl Into<String>,
		body: impl Into<String>,
		options: I,
	) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			category: category.into(),
			subtype: PostSubtype::Poll,
			title: title.into(),
			body: body.into(),
			poll_options: options.into_iter().map(Into::into).collect(),
		}
	}
}

/// Payload for commenting on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddComment {
	pub post_id: PostId,
	pub comment_text: String,
	/// Already-uploaded image URLs attached to the comment.
	#[serde(default)]
	pub comment_images: Vec<String>,
}

impl AddComment {
	pub fn new(post_id: PostId, comment_text: impl Into<String>) -> Self {
		Self {
			post_id,
			comment_text: comment_text.into(),
			comment_images: Vec::new(),
		}
	}

	/// Attach image URLs.
	pub fn with_images<I, S>(mut self, images: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.comment_images = images.into_iter().map(Into::into).collect();
		self
	}
}

/// Payload for voting on a poll option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVote {
	pub poll_id: PollId,
	pub option_index: usize,
}

impl CastVote {
	pub fn new(poll_id: PollId, option_index: usize) -> Self {
		Self {
			poll_id,
			option_index,
		}
	}
}

/// A captured, not-yet-executed gated action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "data", rename_all = "snake_case")]
pub enum Intent {
	CreatePost(CreatePost),
	AddComment(AddComment),
	CastVote(CastVote),
}

impl Intent {
	/// The kind of action this intent will replay as.
	pub fn action(&self) -> ActionKind {
		match self {
			Intent::CreatePost(_) => ActionKind::CreatePost,
			Intent::AddComment(_) => ActionKind::AddComment,
			Intent::CastVote(_) => ActionKind::CastVote,
		}
	}

	/// Serialize to the adjacently tagged JSON form.
	pub fn to_json(&self) -> Result<String, IntentError> {
		serde_json::to_string(self).map_err(IntentError::Malformed)
	}

	/// Parse the adjacently tagged JSON form.
	pub fn from_json(json: &str) -> Result<Self, IntentError> {
		serde_json::from_str(json).map_err(IntentError::Malformed)
	}
}

impl From<CreatePost> for Intent {
	fn from(payload: CreatePost) -> Self {
		Intent::CreatePost(payload)
	}
}

impl From<AddComment> for Intent {
	fn from(payload: AddComment) -> Self {
		Intent::AddComment(payload)
	}
}

impl From<CastVote> for Intent {
	fn from(payload: CastVote) -> Self {
		Intent::CastVote(payload)
	}
}
