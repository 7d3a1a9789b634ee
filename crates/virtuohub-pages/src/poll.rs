//! Poll widget
//!
//! A feed page can show several polls at once. Each widget registers its own
//! `cast_vote` replay handler, every handler sees every replayed vote, and a
//! widget acts only on votes for its own poll.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;
use virtuohub_core::{
	ActionKind, CastVote, HandlerError, Intent, Message, Notifier, PollId, SessionState,
};
use virtuohub_gate::{AuthGate, Gated, RegistrationGuard, ReplayHandlers};

use crate::backend::ActionBackend;
use crate::feedback::{report_backend_failure, settle};

struct PollInner {
	poll_id: PollId,
	options: Vec<String>,
	backend: Arc<dyn ActionBackend>,
	notifier: Arc<dyn Notifier>,
	my_vote: Mutex<Option<usize>>,
}

impl PollInner {
	fn validate(&self, option_index: usize) -> Result<(), HandlerError> {
		if option_index >= self.options.len() {
			return Err(HandlerError::Invalid {
				field: "option_index",
				reason: format!(
					"poll {} has {} options, got index {}",
					self.poll_id,
					self.options.len(),
					option_index
				),
			});
		}
		Ok(())
	}

	fn vote(&self, vote: &CastVote) -> Result<(), HandlerError> {
		self.validate(vote.option_index)?;
		if let Err(err) = self.backend.cast_vote(vote) {
			report_backend_failure(
				self.notifier.as_ref(),
				ActionKind::CastVote,
				"Could not record your vote",
				&err,
			);
			return Err(err.into());
		}
		debug!(poll_id = %self.poll_id, option = vote.option_index, "vote recorded");
		*self.my_vote.lock() = Some(vote.option_index);
		self.notifier.notify(Message::success("Vote recorded"));
		Ok(())
	}
}

/// Voting widget bound to one poll.
pub struct PollWidget {
	gate: AuthGate,
	inner: Arc<PollInner>,
	_registration: RegistrationGuard,
}

impl PollWidget {
	pub fn mount<I, S>(
		gate: &AuthGate,
		poll_id: PollId,
		options: I,
		backend: Arc<dyn ActionBackend>,
	) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let inner = Arc::new(PollInner {
			poll_id,
			options: options.into_iter().map(Into::into).collect(),
			backend,
			notifier: Arc::clone(gate.notifier()),
			my_vote: Mutex::new(None),
		});
		let handler_inner = Arc::clone(&inner);
		let registration = gate
			.registry()
			.register_replay_handlers(ReplayHandlers::new().cast_vote(move |vote| {
				if vote.poll_id != handler_inner.poll_id {
					return Ok(());
				}
				settle(handler_inner.vote(vote))
			}))
			.into_guard();

		Self {
			gate: gate.clone(),
			inner,
			_registration: registration,
		}
	}

	pub fn poll_id(&self) -> &PollId {
		&self.inner.poll_id
	}

	pub fn options(&self) -> &[String] {
		&self.inner.options
	}

	/// Vote for `option_index`, or defer the vote until sign-in.
	pub fn vote(&self, session: &SessionState, option_index: usize) -> Result<Gated<()>, HandlerError> {
		self.inner.validate(option_index)?;
		let vote = CastVote::new(self.inner.poll_id.clone(), option_index);
		let inner = Arc::clone(&self.inner);
		self.gate
			.run_or_defer(session, Intent::CastVote(vote.clone()), move || inner.vote(&vote))
			.transpose()
	}

	/// The option this user voted for, once a vote went through.
	pub fn my_vote(&self) -> Option<usize> {
		*self.inner.my_vote.lock()
	}
}

impl std::fmt::Debug for PollWidget {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("PollWidget")
			.field("poll_id", &self.inner.poll_id)
			.field("options", &self.inner.options)
			.field("my_vote", &*self.inner.my_vote.lock())
			.finish()
	}
}
