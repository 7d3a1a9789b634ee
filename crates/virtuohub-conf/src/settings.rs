//! Gate settings

use std::path::Path;

use serde::{Deserialize, Serialize};
use virtuohub_core::AuthMode;

use crate::env::Env;
use crate::error::{ConfigError, ConfigResult};

/// Toast shown when a replayed action fails synchronously
pub const DEFAULT_FAILURE_MESSAGE: &str = "Action failed — please try again";

/// Behaviour of the deferred-intent authentication gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateSettings {
	/// Text of the single failure notification emitted per failed replay
	pub failure_message: String,
	/// Mode the auth modal opens with when a gated action is deferred
	pub default_auth_mode: AuthMode,
	/// Replay the pending intent automatically on a guest to signed-in edge
	pub replay_on_sign_in: bool,
}

impl Default for GateSettings {
	fn default() -> Self {
		Self {
			failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
			default_auth_mode: AuthMode::SignIn,
			replay_on_sign_in: true,
		}
	}
}

impl GateSettings {
	/// Parse settings from TOML.
	///
	/// Keys may live under a `[gate]` table or at the top level. When a
	/// `[gate]` table is present, everything outside it belongs to other
	/// parts of the application and is ignored. Missing keys keep their
	/// defaults; unknown keys inside the gate settings are rejected.
	pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
		let mut table: toml::Table = toml::from_str(source)?;
		let settings: Self = match table.remove("gate") {
			Some(gate) => gate.try_into()?,
			None => toml::Value::Table(table).try_into()?,
		};
		settings.validate()?;
		Ok(settings)
	}

	/// Read and parse a TOML settings file.
	pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	/// Defaults, then `path` if given, then the process environment.
	pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
		let settings = match path {
			Some(path) => Self::from_toml_file(path)?,
			None => Self::default(),
		};
		settings.with_env_overrides(&Env::new())
	}

	/// Apply `FAILURE_MESSAGE`, `DEFAULT_AUTH_MODE` and `REPLAY_ON_SIGN_IN`
	/// overrides from `env`.
	pub fn with_env_overrides(mut self, env: &Env) -> ConfigResult<Self> {
		if let Some(message) = env.str("FAILURE_MESSAGE") {
			self.failure_message = message;
		}
		if let Some(mode) = env.str("DEFAULT_AUTH_MODE") {
			self.default_auth_mode = mode.parse().map_err(|_| ConfigError::EnvParse {
				key: env.key_name("DEFAULT_AUTH_MODE"),
				value_len: mode.len(),
			})?;
		}
		if let Some(replay) = env.bool("REPLAY_ON_SIGN_IN")? {
			self.replay_on_sign_in = replay;
		}
		self.validate()?;
		Ok(self)
	}

	/// Check invariants the gate relies on.
	pub fn validate(&self) -> ConfigResult<()> {
		if self.failure_message.trim().is_empty() {
			return Err(ConfigError::Invalid {
				key: "failure_message",
				reason: "must not be empty".to_string(),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashMap;

	fn env_of(pairs: &[(&str, &str)]) -> Env {
		let vars: HashMap<String, String> = pairs
			.iter()
			.map(|(k, v)| (format!("VIRTUOHUB_GATE_{}", k), v.to_string()))
			.collect();
		Env::from_lookup(move |key| vars.get(key).cloned())
	}

	#[rstest]
	fn test_defaults() {
		let settings = GateSettings::default();

		assert_eq!(settings.failure_message, DEFAULT_FAILURE_MESSAGE);
		assert_eq!(settings.default_auth_mode, AuthMode::SignIn);
		assert!(settings.replay_on_sign_in);
	}

	#[rstest]
	#[case("")]
	#[case("# nothing configured\n")]
	#[case("[gate]\n")]
	fn test_empty_toml_yields_defaults(#[case] source: &str) {
		assert_eq!(GateSettings::from_toml_str(source).unwrap(), GateSettings::default());
	}

	#[rstest]
	fn test_gate_table() {
		let settings = GateSettings::from_toml_str(
			r#"
			[gate]
			failure_message = "Something went wrong"
			default_auth_mode = "signup"
			replay_on_sign_in = false
			"#,
		)
		.unwrap();

		assert_eq!(settings.failure_message, "Something went wrong");
		assert_eq!(settings.default_auth_mode, AuthMode::SignUp);
		assert!(!settings.replay_on_sign_in);
	}

	#[rstest]
	fn test_top_level_keys() {
		let settings = GateSettings::from_toml_str("replay_on_sign_in = false").unwrap();
		assert!(!settings.replay_on_sign_in);
	}

	#[rstest]
	fn test_gate_table_ignores_sibling_sections() {
		// Arrange
		let source = r#"
			debug = true

			[gate]
			replay_on_sign_in = false

			[database]
			url = "postgres://localhost/virtuohub"
			"#;

		// Act
		let settings = GateSettings::from_toml_str(source).unwrap();

		// Assert
		assert!(!settings.replay_on_sign_in);
		assert_eq!(settings.failure_message, DEFAULT_FAILURE_MESSAGE);
	}

	#[rstest]
	fn test_unknown_key_inside_gate_table_rejected() {
		let err = GateSettings::from_toml_str("[gate]\nretries = 3\n").unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)));
	}

	#[rstest]
	#[case("unknown_key = 1")]
	#[case("default_auth_mode = \"login\"")]
	#[case("replay_on_sign_in = \"sometimes\"")]
	#[case("[gate")]
	fn test_invalid_toml(#[case] source: &str) {
		let err = GateSettings::from_toml_str(source).unwrap_err();
		assert!(matches!(err, ConfigError::Toml(_)));
	}

	#[rstest]
	fn test_blank_failure_message_rejected() {
		let err = GateSettings::from_toml_str("failure_message = \"   \"").unwrap_err();
		assert!(matches!(
			err,
			ConfigError::Invalid {
				key: "failure_message",
				..
			}
		));
	}

	#[rstest]
	fn test_env_overrides() {
		let env = env_of(&[
			("FAILURE_MESSAGE", "Try again later"),
			("DEFAULT_AUTH_MODE", "signup"),
			("REPLAY_ON_SIGN_IN", "no"),
		]);

		let settings = GateSettings::default().with_env_overrides(&env).unwrap();

		assert_eq!(settings.failure_message, "Try again later");
		assert_eq!(settings.default_auth_mode, AuthMode::SignUp);
		assert!(!settings.replay_on_sign_in);
	}

	#[rstest]
	fn test_env_override_bad_mode() {
		let env = env_of(&[("DEFAULT_AUTH_MODE", "register")]);

		let err = GateSettings::default().with_env_overrides(&env).unwrap_err();

		assert!(matches!(
			err,
			ConfigError::EnvParse { ref key, value_len: 8 } if key == "VIRTUOHUB_GATE_DEFAULT_AUTH_MODE"
		));
	}

	#[rstest]
	fn test_env_override_empty_message_rejected() {
		let env = env_of(&[("FAILURE_MESSAGE", "")]);

		let err = GateSettings::default().with_env_overrides(&env).unwrap_err();

		assert!(matches!(err, ConfigError::Invalid { .. }));
	}
}
