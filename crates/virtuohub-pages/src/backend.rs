//! Backend action endpoints
//!
//! The components never talk to the network directly; they go through an
//! [`ActionBackend`], which the application wires to its API client.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use virtuohub_core::{AddComment, BackendError, CastVote, CreatePost, PostId};

/// Result alias for backend calls
pub type BackendResult<T> = Result<T, BackendError>;

/// The three gated endpoints.
pub trait ActionBackend: Send + Sync {
	/// Publish a post and return its id.
	fn create_post(&self, post: &CreatePost) -> BackendResult<PostId>;

	fn add_comment(&self, comment: &AddComment) -> BackendResult<()>;

	fn cast_vote(&self, vote: &CastVote) -> BackendResult<()>;
}

/// A call received by [`InMemoryBackend`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
	CreatePost(CreatePost),
	AddComment(AddComment),
	CastVote(CastVote),
}

/// Backend that records calls in memory.
///
/// Used for previews and tests. Failures can be queued with
/// [`InMemoryBackend::fail_next`]; each queued error is returned by exactly
/// one subsequent call, which is then not recorded.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
	calls: Mutex<Vec<BackendCall>>,
	failures: Mutex<VecDeque<BackendError>>,
	next_post: AtomicU64,
}

impl InMemoryBackend {
	pub fn new() -> Self {
		Self::default()
	}

	/// Make the next call fail with `error`.
	pub fn fail_next(&self, error: BackendError) {
		self.failures.lock().push_back(error);
	}

	/// Calls that succeeded, in order.
	pub fn calls(&self) -> Vec<BackendCall> {
		self.calls.lock().clone()
	}

	fn record(&self, call: BackendCall) -> BackendResult<()> {
		if let Some(error) = self.failures.lock().pop_front() {
			return Err(error);
		}
		self.calls.lock().push(call);
		Ok(())
	}
}

impl ActionBackend for InMemoryBackend {
	fn create_post(&self, post: &CreatePost) -> BackendResult<PostId> {
		self.record(BackendCall::CreatePost(post.clone()))?;
		let n = self.next_post.fetch_add(1, Ordering::Relaxed) + 1;
		Ok(PostId::new(format!("post-{n}")))
	}

	fn add_comment(&self, comment: &AddComment) -> BackendResult<()> {
		self.record(BackendCall::AddComment(comment.clone()))
	}

	fn cast_vote(&self, vote: &CastVote) -> BackendResult<()> {
		self.record(BackendCall::CastVote(vote.clone()))
	}
}
