//! Comment box
//!
//! One box is mounted per post. Every mounted box receives every replayed
//! `add_comment` intent and ignores those addressed to other posts.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use virtuohub_core::{
	ActionKind, AddComment, HandlerError, Intent, Message, Notifier, PostId, SessionState,
};
use virtuohub_gate::{AuthGate, Gated, RegistrationGuard, ReplayHandlers};

use crate::backend::ActionBackend;
use crate::feedback::{report_backend_failure, settle};

struct CommentInner {
	post_id: PostId,
	backend: Arc<dyn ActionBackend>,
	notifier: Arc<dyn Notifier>,
	posted: Mutex<Vec<AddComment>>,
}

impl CommentInner {
	fn post(&self, comment: &AddComment) -> Result<(), HandlerError> {
		validate(comment)?;
		if let Err(err) = self.backend.add_comment(comment) {
			report_backend_failure(
				self.notifier.as_ref(),
				ActionKind::AddComment,
				"Could not post your comment",
				&err,
			);
			return Err(err.into());
		}
		debug!(post_id = %self.post_id, "comment posted");
		self.posted.lock().push(comment.clone());
		self.notifier.notify(Message::success("Comment posted"));
		Ok(())
	}
}

/// A comment needs text or at least one image.
pub fn validate(comment: &AddComment) -> Result<(), HandlerError> {
	if comment.comment_text.trim().is_empty() && comment.comment_images.is_empty() {
		return Err(HandlerError::Invalid {
			field: "comment_text",
			reason: "a comment needs text or an image".to_string(),
		});
	}
	Ok(())
}

/// Comment input bound to one post.
pub struct CommentBox {
	gate: AuthGate,
	inner: Arc<CommentInner>,
	_registration: RegistrationGuard,
}

impl CommentBox {
	pub fn mount(gate: &AuthGate, post_id: PostId, backend: Arc<dyn ActionBackend>) -> Self {
		let inner = Arc::new(CommentInner {
			post_id,
			backend,
			notifier: Arc::clone(gate.notifier()),
			posted: Mutex::new(Vec::new()),
		});
		let handler_inner = Arc::clone(&inner);
		let registration = gate
			.registry()
			.register_replay_handlers(ReplayHandlers::new().add_comment(move |comment| {
				if comment.post_id != handler_inner.post_id {
					return Ok(());
				}
				settle(handler_inner.post(comment))
			}))
			.into_guard();

		Self {
			gate: gate.clone(),
			inner,
			_registration: registration,
		}
	}

	pub fn post_id(&self) -> &PostId {
		&self.inner.post_id
	}

	/// Post a comment on this box's post, or defer it until sign-in.
	pub fn submit<I, S>(
		&self,
		session: &SessionState,
		text: impl Into<String>,
		images: I,
	) -> Result<Gated<()>, HandlerError>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let comment = AddComment::new(self.inner.post_id.clone(), text).with_images(images);
		validate(&comment)?;
		let inner = Arc::clone(&self.inner);
		self.gate
			.run_or_defer(session, Intent::AddComment(comment.clone()), move || {
				inner.post(&comment)
			})
			.transpose()
	}

	/// Comments this box posted successfully, in order.
	pub fn posted(&self) -> Vec<AddComment> {
		self.inner.posted.lock().clone()
	}
}

impl std::fmt::Debug for CommentBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CommentBox")
			.field("post_id", &self.inner.post_id)
			.field("posted", &self.inner.posted.lock().len())
			.finish()
	}
}
