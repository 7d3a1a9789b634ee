//! Replay handler registry
//!
//! Maps each action kind to an ordered list of handlers. Several instances of
//! the same widget (e.g. multiple polls on one page) may be mounted at once,
//! so every kind holds any number of handlers and a replay fans out to all of
//! them in registration order.
//!
//! # Design
//!
//! - **Owned, not global**: one registry per application root, shared by
//!   cloning the handle
//! - **Identity-based removal**: each registered handler gets a unique id;
//!   a [`Registration`] removes exactly the ids it added
//! - **Lock-free dispatch**: handlers are snapshotted before they run, so a
//!   handler may register, unregister or replay without deadlocking
//!
//! ## Example
//!
//! ```
//! use virtuohub_core::ActionKind;
//! use virtuohub_gate::{ReplayHandlerRegistry, ReplayHandlers};
//!
//! let registry = ReplayHandlerRegistry::new();
//! let registration = registry.register_replay_handlers(
//!     ReplayHandlers::new().cast_vote(|_vote| Ok(())),
//! );
//! assert_eq!(registry.handler_count(ActionKind::CastVote), 1);
//!
//! registration.unregister();
//! assert_eq!(registry.handler_count(ActionKind::CastVote), 0);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::debug;
use virtuohub_core::{ActionKind, CastVote, HandlerResult, Intent, PollId};

use crate::handler::{AddCommentHandler, CastVoteHandler, CreatePostHandler, ReplayHandlers};

/// Unique id of one registered handler instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl HandlerId {
	pub fn get(&self) -> u64 {
		self.0
	}
}

/// A handler bound to the payload of the intent being replayed
pub(crate) type BoundHandler<'a> = Box<dyn Fn() -> HandlerResult + 'a>;

struct Entry<H> {
	id: HandlerId,
	handler: H,
}

struct VoteEntry {
	id: HandlerId,
	/// `Some` for handlers subscribed to a single poll
	poll_id: Option<PollId>,
	handler: CastVoteHandler,
}

impl VoteEntry {
	fn accepts(&self, vote: &CastVote) -> bool {
		self.poll_id.as_ref().is_none_or(|id| *id == vote.poll_id)
	}
}

#[derive(Default)]
struct HandlerLists {
	create_post: Vec<Entry<CreatePostHandler>>,
	add_comment: Vec<Entry<AddCommentHandler>>,
	cast_vote: Vec<VoteEntry>,
}

impl HandlerLists {
	fn remove(&mut self, ids: &[HandlerId]) -> usize {
		let before = self.len();
		self.create_post.retain(|e| !ids.contains(&e.id));
		self.add_comment.retain(|e| !ids.contains(&e.id));
		self.cast_vote.retain(|e| !ids.contains(&e.id));
		before - self.len()
	}

	fn len(&self) -> usize {
		self.create_post.len() + self.add_comment.len() + self.cast_vote.len()
	}
}

struct RegistryInner {
	lists: RwLock<HandlerLists>,
	next_id: AtomicU64,
}

impl RegistryInner {
	fn next_id(&self) -> HandlerId {
		HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed))
	}
}

/// Per-action handler lists, scoped to one application root.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct ReplayHandlerRegistry {
	inner: Arc<RegistryInner>,
}

impl ReplayHandlerRegistry {
	pub fn new() -> Self {
		Self {
			inner: Arc::new(RegistryInner {
				lists: RwLock::new(HandlerLists::default()),
				next_id: AtomicU64::new(1),
			}),
		}
	}

	/// Append every handler present in `handlers` to its action's list.
	///
	/// The returned [`Registration`] removes exactly these handler instances.
	pub fn register_replay_handlers(&self, handlers: ReplayHandlers) -> Registration {
		let mut ids = Vec::with_capacity(3);
		let mut lists = self.inner.lists.write();

		if let Some(handler) = handlers.create_post {
			let id = self.inner.next_id();
			lists.create_post.push(Entry { id, handler });
			ids.push(id);
		}
		if let Some(handler) = handlers.add_comment {
			let id = self.inner.next_id();
			lists.add_comment.push(Entry { id, handler });
			ids.push(id);
		}
		if let Some(handler) = handlers.cast_vote {
			let id = self.inner.next_id();
			lists.cast_vote.push(VoteEntry {
				id,
				poll_id: None,
				handler,
			});
			ids.push(id);
		}
		drop(lists);

		debug!(handlers = ids.len(), "registered replay handlers");
		Registration::new(Arc::downgrade(&self.inner), ids)
	}

	/// Subscribe a vote handler to a single poll.
	///
	/// Unlike handlers added through [`Self::register_replay_handlers`], which
	/// receive every vote and must filter on `poll_id` themselves, this handler
	/// only runs for intents targeting `poll_id`.
	pub fn register_vote_handler_for<F>(&self, poll_id: PollId, handler: F) -> Registration
	where
		F: Fn(&CastVote) -> HandlerResult + Send + Sync + 'static,
	{
		let id = self.inner.next_id();
		debug!(poll_id = %poll_id, "registered keyed vote handler");
		self.inner.lists.write().cast_vote.push(VoteEntry {
			id,
			poll_id: Some(poll_id),
			handler: Arc::new(handler),
		});
		Registration::new(Arc::downgrade(&self.inner), vec![id])
	}

	/// Number of handlers registered for `kind`, keyed ones included.
	pub fn handler_count(&self, kind: ActionKind) -> usize {
		let lists = self.inner.lists.read();
		match kind {
			ActionKind::CreatePost => lists.create_post.len(),
			ActionKind::AddComment => lists.add_comment.len(),
			ActionKind::CastVote => lists.cast_vote.len(),
		}
	}

	/// Total number of registered handlers.
	pub fn len(&self) -> usize {
		self.inner.lists.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Snapshot the handlers matching `intent`, in registration order, each
	/// bound to the intent's payload.
	///
	/// The registry lock is released before this returns.
	pub(crate) fn bind<'a>(&self, intent: &'a Intent) -> Vec<BoundHandler<'a>> {
		let lists = self.inner.lists.read();
		match intent {
			Intent::CreatePost(post) => lists
				.create_post
				.iter()
				.map(|e| {
					let handler = Arc::clone(&e.handler);
					Box::new(move || handler(post)) as BoundHandler<'a>
				})
				.collect(),
			Intent::AddComment(comment) => lists
				.add_comment
				.iter()
				.map(|e| {
					let handler = Arc::clone(&e.handler);
					Box::new(move || handler(comment)) as BoundHandler<'a>
				})
				.collect(),
			Intent::CastVote(vote) => lists
				.cast_vote
				.iter()
				.filter(|e| e.accepts(vote))
				.map(|e| {
					let handler = Arc::clone(&e.handler);
					Box::new(move || handler(vote)) as BoundHandler<'a>
				})
				.collect(),
		}
	}
}

impl Default for ReplayHandlerRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for ReplayHandlerRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let lists = self.inner.lists.read();
		f.debug_struct("ReplayHandlerRegistry")
			.field("create_post", &lists.create_post.len())
			.field("add_comment", &lists.add_comment.len())
			.field("cast_vote", &lists.cast_vote.len())
			.finish()
	}
}

/// Handle returned by a registration call.
///
/// [`Registration::unregister`] removes exactly the handler instances that
/// call added. It is idempotent and stays safe after the registry is gone.
/// Dropping a `Registration` does not unregister; use
/// [`Registration::into_guard`] for that.
#[must_use = "handlers stay registered until `unregister` is called"]
pub struct Registration {
	registry: Weak<RegistryInner>,
	ids: Vec<HandlerId>,
	active: AtomicBool,
}

impl Registration {
	fn new(registry: Weak<RegistryInner>, ids: Vec<HandlerId>) -> Self {
		Self {
			registry,
			ids,
			active: AtomicBool::new(true),
		}
	}

	/// Ids of the handlers this registration added.
	pub fn handler_ids(&self) -> &[HandlerId] {
		&self.ids
	}

	/// False once [`Self::unregister`] has run.
	pub fn is_active(&self) -> bool {
		self.active.load(Ordering::Acquire)
	}

	/// Remove the handlers added by this registration.
	///
	/// Returns the number of handlers removed: zero on every call after the
	/// first, or when the registry no longer exists.
	pub fn unregister(&self) -> usize {
		if !self.active.swap(false, Ordering::AcqRel) {
			return 0;
		}
		let Some(inner) = self.registry.upgrade() else {
			return 0;
		};
		let removed = inner.lists.write().remove(&self.ids);
		debug!(removed, "unregistered replay handlers");
		removed
	}

	/// Convert into a guard that unregisters when dropped.
	pub fn into_guard(self) -> RegistrationGuard {
		RegistrationGuard(self)
	}
}

impl std::fmt::Debug for Registration {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registration")
			.field("ids", &self.ids)
			.field("active", &self.is_active())
			.finish()
	}
}

/// Unregisters its handlers on drop, tying them to a component's lifetime.
#[derive(Debug)]
pub struct RegistrationGuard(Registration);

impl RegistrationGuard {
	/// The underlying registration.
	pub fn registration(&self) -> &Registration {
		&self.0
	}
}

impl Drop for RegistrationGuard {
	fn drop(&mut self) {
		self.0.unregister();
	}
}
