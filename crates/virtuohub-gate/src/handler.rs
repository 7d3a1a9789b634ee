//! Replay handler types
//!
//! A replay handler is a component-owned callback that knows how to perform
//! one kind of deferred action. Handlers receive the strongly typed payload
//! of the intent being replayed and report synchronous failure through
//! [`HandlerResult`].

use std::sync::Arc;

use virtuohub_core::{AddComment, CastVote, CreatePost, HandlerResult};

/// Handler for [`virtuohub_core::Intent::CreatePost`]
pub type CreatePostHandler = Arc<dyn Fn(&CreatePost) -> HandlerResult + Send + Sync + 'static>;

/// Handler for [`virtuohub_core::Intent::AddComment`]
pub type AddCommentHandler = Arc<dyn Fn(&AddComment) -> HandlerResult + Send + Sync + 'static>;

/// Handler for [`virtuohub_core::Intent::CastVote`]
pub type CastVoteHandler = Arc<dyn Fn(&CastVote) -> HandlerResult + Send + Sync + 'static>;

/// A set of handlers registered together.
///
/// Any subset of the three action kinds may be provided. Registering the set
/// yields one [`crate::Registration`] that removes exactly these handlers.
///
/// ## Example
///
/// ```
/// use virtuohub_gate::ReplayHandlers;
///
/// let handlers = ReplayHandlers::new()
///     .create_post(|post| {
///         println!("publishing {}", post.title);
///         Ok(())
///     })
///     .cast_vote(|vote| {
///         println!("voting {} on {}", vote.option_index, vote.poll_id);
///         Ok(())
///     });
/// assert!(!handlers.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct ReplayHandlers {
	pub(crate) create_post: Option<CreatePostHandler>,
	pub(crate) add_comment: Option<AddCommentHandler>,
	pub(crate) cast_vote: Option<CastVoteHandler>,
}

impl ReplayHandlers {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the `create_post` handler.
	pub fn create_post<F>(mut self, handler: F) -> Self
	where
		F: Fn(&CreatePost) -> HandlerResult + Send + Sync + 'static,
	{
		self.create_post = Some(Arc::new(handler));
		self
	}

	/// Set the `add_comment` handler.
	pub fn add_comment<F>(mut self, handler: F) -> Self
	where
		F: Fn(&AddComment) -> HandlerResult + Send + Sync + 'static,
	{
		self.add_comment = Some(Arc::new(handler));
		self
	}

	/// Set the `cast_vote` handler.
	pub fn cast_vote<F>(mut self, handler: F) -> Self
	where
		F: Fn(&CastVote) -> HandlerResult + Send + Sync + 'static,
	{
		self.cast_vote = Some(Arc::new(handler));
		self
	}

	/// True when no handler was provided.
	pub fn is_empty(&self) -> bool {
		self.create_post.is_none() && self.add_comment.is_none() && self.cast_vote.is_none()
	}
}

impl std::fmt::Debug for ReplayHandlers {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ReplayHandlers")
			.field("create_post", &self.create_post.as_ref().map(|_| "<function>"))
			.field("add_comment", &self.add_comment.as_ref().map(|_| "<function>"))
			.field("cast_vote", &self.cast_vote.as_ref().map(|_| "<function>"))
			.finish()
	}
}
