//! Post composer
//!
//! Creates feed threads and polls. Guests have their draft captured as a
//! `create_post` intent and published after they sign in.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use virtuohub_core::{
	ActionKind, CreatePost, HandlerError, Intent, Message, Notifier, PostId, PostSubtype,
	SessionState,
};
use virtuohub_gate::{AuthGate, Gated, RegistrationGuard, ReplayHandlers};

use crate::backend::ActionBackend;
use crate::feedback::{report_backend_failure, settle};

/// Minimum number of options a poll must offer
pub const MIN_POLL_OPTIONS: usize = 2;

struct ComposerInner {
	backend: Arc<dyn ActionBackend>,
	notifier: Arc<dyn Notifier>,
	published: Mutex<Vec<PostId>>,
}

impl ComposerInner {
	fn publish(&self, post: &CreatePost) -> Result<PostId, HandlerError> {
		validate(post)?;
		match self.backend.create_post(post) {
			Ok(id) => {
				debug!(post_id = %id, "post published");
				self.published.lock().push(id.clone());
				self.notifier.notify(Message::success("Post published"));
				Ok(id)
			}
			Err(err) => {
				report_backend_failure(
					self.notifier.as_ref(),
					ActionKind::CreatePost,
					"Could not publish your post",
					&err,
				);
				Err(err.into())
			}
		}
	}
}

/// Check a draft before it is sent or deferred.
pub fn validate(post: &CreatePost) -> Result<(), HandlerError> {
	if post.title.trim().is_empty() {
		return Err(HandlerError::Invalid {
			field: "title",
			reason: "must not be blank".to_string(),
		});
	}
	if post.category.trim().is_empty() {
		return Err(HandlerError::Invalid {
			field: "category",
			reason: "must not be blank".to_string(),
		});
	}
	if post.subtype == PostSubtype::Poll && post.poll_options.len() < MIN_POLL_OPTIONS {
		return Err(HandlerError::Invalid {
			field: "poll_options",
			reason: format!("a poll needs at least {MIN_POLL_OPTIONS} options"),
		});
	}
	Ok(())
}

/// Composer for new threads and polls.
///
/// Its replay handler stays registered for as long as the composer lives.
/// A draft is not tied to any post, so the handler has nothing to filter
/// on: every mounted composer publishes a replayed `create_post` intent.
/// Mount one composer per gate.
pub struct PostComposer {
	gate: AuthGate,
	inner: Arc<ComposerInner>,
	_registration: RegistrationGuard,
}

impl PostComposer {
	/// Mount the composer and register its `create_post` replay handler.
	pub fn mount(gate: &AuthGate, backend: Arc<dyn ActionBackend>) -> Self {
		let inner = Arc::new(ComposerInner {
			backend,
			notifier: Arc::clone(gate.notifier()),
			published: Mutex::new(Vec::new()),
		});
		let handler_inner = Arc::clone(&inner);
		let registration = gate
			.registry()
			.register_replay_handlers(
				ReplayHandlers::new().create_post(move |post| settle(handler_inner.publish(post))),
			)
			.into_guard();

		Self {
			gate: gate.clone(),
			inner,
			_registration: registration,
		}
	}

	/// Publish `post`, or defer it until the guest signs in.
	///
	/// Invalid drafts are rejected before anything is deferred.
	pub fn submit(
		&self,
		session: &SessionState,
		post: CreatePost,
	) -> Result<Gated<PostId>, HandlerError> {
		validate(&post)?;
		let inner = Arc::clone(&self.inner);
		self.gate
			.run_or_defer(session, Intent::CreatePost(post.clone()), move || {
				inner.publish(&post)
			})
			.transpose()
	}

	/// Ids of posts this composer published, in order.
	pub fn published(&self) -> Vec<PostId> {
		self.inner.published.lock().clone()
	}
}

impl std::fmt::Debug for PostComposer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PostComposer")
			.field("published", &*self.inner.published.lock())
			.finish()
	}
}
