//! Intent store replay integration tests
//!
//! Exercises the store, registry and controller binding together through
//! the public API.

use std::sync::Arc;

use parking_lot::Mutex;
use rstest::*;
use virtuohub_conf::GateSettings;
use virtuohub_core::{
	ActionKind, AddComment, AuthMode, CastVote, CreatePost, HandlerError, Intent, Level,
	MessagesContainer, PollId, PostId,
};
use virtuohub_gate::{IntentStore, ReplayHandlerRegistry, ReplayHandlers, ReplayOutcome};

type Calls = Arc<Mutex<Vec<String>>>;

struct Fixture {
	store: IntentStore,
	messages: MessagesContainer,
	calls: Calls,
}

impl Fixture {
	/// Handlers for every action kind that record what they received.
	fn recording_handlers(&self, label: &'static str) -> ReplayHandlers {
		let posts = Arc::clone(&self.calls);
		let comments = Arc::clone(&self.calls);
		let votes = Arc::clone(&self.calls);
		ReplayHandlers::new()
			.create_post(move |post: &CreatePost| {
				posts.lock().push(format!("{label}:post:{}", post.title));
				Ok(())
			})
			.add_comment(move |comment: &AddComment| {
				comments
					.lock()
					.push(format!("{label}:comment:{}", comment.comment_text));
				Ok(())
			})
			.cast_vote(move |vote: &CastVote| {
				votes
					.lock()
					.push(format!("{label}:vote:{}:{}", vote.poll_id, vote.option_index));
				Ok(())
			})
	}

	fn calls(&self) -> Vec<String> {
		self.calls.lock().clone()
	}
}

#[fixture]
fn fixture() -> Fixture {
	let messages = MessagesContainer::new();
	Fixture {
		store: IntentStore::new(
			ReplayHandlerRegistry::new(),
			Arc::new(messages.clone()),
			&GateSettings::default(),
		),
		messages,
		calls: Arc::new(Mutex::new(Vec::new())),
	}
}

fn post(title: &str) -> Intent {
	Intent::CreatePost(CreatePost::thread("general", title, "body"))
}

fn vote(poll: &str, option: usize) -> Intent {
	Intent::CastVote(CastVote::new(PollId::new(poll), option))
}

/// Test: cleared intent is never replayed
///
/// Category: Happy Path
#[rstest]
fn test_cleared_intent_dispatches_nothing(fixture: Fixture) {
	// Arrange
	let _reg = fixture
		.store
		.register_replay_handlers(fixture.recording_handlers("a"));
	fixture.store.set_intent(post("draft"));

	// Act
	fixture.store.clear_intent();
	let outcome = fixture.store.replay_intent();

	// Assert
	assert_eq!(outcome, ReplayOutcome::NoIntent);
	assert!(fixture.calls().is_empty());
}

/// Test: last write wins
///
/// Category: Happy Path
#[rstest]
fn test_overwritten_intent_replays_only_latest(fixture: Fixture) {
	// Arrange
	let _reg = fixture
		.store
		.register_replay_handlers(fixture.recording_handlers("a"));
	fixture.store.set_intent(post("first"));
	fixture
		.store
		.set_intent(Intent::AddComment(AddComment::new(PostId::new("p7"), "second")));

	// Act
	fixture.store.replay_intent();

	// Assert
	assert_eq!(fixture.calls(), vec!["a:comment:second"]);
}

/// Test: every handler under one action runs once, in order
///
/// Category: Happy Path
#[rstest]
fn test_all_handlers_run_in_registration_order(fixture: Fixture) {
	// Arrange
	let _a = fixture
		.store
		.register_replay_handlers(fixture.recording_handlers("a"));
	let _b = fixture
		.store
		.register_replay_handlers(fixture.recording_handlers("b"));
	let _c = fixture
		.store
		.register_replay_handlers(fixture.recording_handlers("c"));
	fixture.store.set_intent(vote("P1", 2));

	// Act
	let outcome = fixture.store.replay_intent();

	// Assert
	assert_eq!(
		outcome,
		ReplayOutcome::Dispatched {
			action: ActionKind::CastVote,
			invoked: 3,
			failed: 0,
		}
	);
	assert_eq!(
		fixture.calls(),
		vec!["a:vote:P1:2", "b:vote:P1:2", "c:vote:P1:2"]
	);
}

/// Test: unregistering one set leaves the others callable
///
/// Category: Happy Path
#[rstest]
fn test_unregister_one_leaves_others(fixture: Fixture) {
	// Arrange
	let a = fixture
		.store
		.register_replay_handlers(fixture.recording_handlers("a"));
	let _b = fixture
		.store
		.register_replay_handlers(fixture.recording_handlers("b"));
	fixture.store.set_intent(post("hello"));

	// Act
	a.unregister();
	a.unregister();
	fixture.store.replay_intent();

	// Assert
	assert_eq!(fixture.calls(), vec!["b:post:hello"]);
}

/// Test: a failing handler still clears the intent with one toast
///
/// Category: Error Path
#[rstest]
fn test_failure_clears_intent_with_single_toast(fixture: Fixture) {
	// Arrange
	let _broken = fixture.store.register_replay_handlers(
		ReplayHandlers::new()
			.cast_vote(|_| Err(HandlerError::rejected("poll closed"))),
	);
	let _panicking = fixture
		.store
		.register_replay_handlers(ReplayHandlers::new().cast_vote(|_| panic!("unmounted")));
	let _healthy = fixture
		.store
		.register_replay_handlers(fixture.recording_handlers("ok"));
	fixture.store.set_intent(vote("P1", 0));

	// Act
	let outcome = fixture.store.replay_intent();

	// Assert
	assert_eq!(
		outcome,
		ReplayOutcome::Dispatched {
			action: ActionKind::CastVote,
			invoked: 3,
			failed: 2,
		}
	);
	assert_eq!(fixture.calls(), vec!["ok:vote:P1:0"]);
	assert!(fixture.store.intent().is_none());
	assert_eq!(fixture.messages.len(), 1);
	assert_eq!(fixture.messages.count_level(Level::Error), 1);
}

/// Test: request_auth without a controller is a no-op
///
/// Category: Edge Case
#[rstest]
#[case(AuthMode::SignIn)]
#[case(AuthMode::SignUp)]
fn test_request_auth_without_controller(fixture: Fixture, #[case] mode: AuthMode) {
	assert!(!fixture.store.request_auth(mode));
}

/// Test: a second replay after success does nothing
///
/// Category: Edge Case
#[rstest]
fn test_double_replay_dispatches_once(fixture: Fixture) {
	let _reg = fixture
		.store
		.register_replay_handlers(fixture.recording_handlers("a"));
	fixture.store.set_intent(post("once"));

	fixture.store.replay_intent();
	let second = fixture.store.replay_intent();

	assert_eq!(second, ReplayOutcome::NoIntent);
	assert_eq!(fixture.calls(), vec!["a:post:once"]);
}

/// Test: keyed vote handlers fire only for their poll
///
/// Category: Happy Path
#[rstest]
fn test_keyed_vote_handlers(fixture: Fixture) {
	// Arrange
	let mut guards = Vec::new();
	for poll in ["P1", "P2"] {
		let calls = Arc::clone(&fixture.calls);
		guards.push(
			fixture
				.store
				.register_vote_handler_for(PollId::new(poll), move |vote: &CastVote| {
					calls.lock().push(format!("{poll}:{}", vote.option_index));
					Ok(())
				})
				.into_guard(),
		);
	}
	fixture.store.set_intent(vote("P2", 4));

	// Act
	let outcome = fixture.store.replay_intent();

	// Assert
	assert!(matches!(outcome, ReplayOutcome::Dispatched { invoked: 1, .. }));
	assert_eq!(fixture.calls(), vec!["P2:4"]);
}

/// Test: an exported intent survives a redirect
///
/// Category: Happy Path
#[rstest]
fn test_export_restore_across_stores(fixture: Fixture) {
	// Arrange
	let before_redirect = IntentStore::new(
		ReplayHandlerRegistry::new(),
		Arc::new(MessagesContainer::new()),
		&GateSettings::default(),
	);
	before_redirect.set_intent(Intent::CreatePost(CreatePost::poll(
		"games",
		"Best map?",
		"Vote below",
		vec!["Dust".to_string(), "Nuke".to_string()],
	)));
	let saved = before_redirect.export_intent().unwrap().unwrap();

	let _reg = fixture
		.store
		.register_replay_handlers(fixture.recording_handlers("after"));

	// Act
	fixture.store.restore_intent(&saved).unwrap();
	fixture.store.replay_intent();

	// Assert
	assert_eq!(fixture.calls(), vec!["after:post:Best map?"]);
}
