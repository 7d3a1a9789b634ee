//! User feedback shared by the components

use tracing::warn;
use virtuohub_core::{ActionKind, BackendError, HandlerError, HandlerResult, Message, Notifier};

/// Tell the user a backend call failed.
pub(crate) fn report_backend_failure(
	notifier: &dyn Notifier,
	action: ActionKind,
	text: &str,
	error: &BackendError,
) {
	warn!(action = %action, error = %error, "backend call failed");
	notifier.notify(Message::error(text).with_tags([action.as_str()]));
}

/// Convert a component result into a replay handler result.
///
/// Backend failures have already been shown to the user by the component, so
/// they count as handled; anything else is returned to the intent store.
pub(crate) fn settle<T>(result: Result<T, HandlerError>) -> HandlerResult {
	match result {
		Ok(_) | Err(HandlerError::Backend(_)) => Ok(()),
		Err(err) => Err(err),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use virtuohub_core::{Level, MessagesContainer};

	#[rstest]
	fn test_backend_failure_is_settled() {
		let result: Result<(), HandlerError> = Err(BackendError::Unauthorized.into());
		assert!(settle(result).is_ok());
	}

	#[rstest]
	fn test_validation_failure_is_returned() {
		let result: Result<(), HandlerError> = Err(HandlerError::Invalid {
			field: "option_index",
			reason: "out of range".to_string(),
		});
		assert!(matches!(
			settle(result),
			Err(HandlerError::Invalid {
				field: "option_index",
				..
			})
		));
	}

	#[rstest]
	fn test_report_tags_action() {
		let messages = MessagesContainer::new();

		report_backend_failure(
			&messages,
			ActionKind::CastVote,
			"Could not record your vote",
			&BackendError::Network("timeout".to_string()),
		);

		let sent = messages.take_messages();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].level, Level::Error);
		assert_eq!(sent[0].tags, vec!["cast_vote"]);
	}
}
