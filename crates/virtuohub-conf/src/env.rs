//! Environment variable overrides
//!
//! Variables are looked up with a prefix (default `VIRTUOHUB_GATE_`). The
//! lookup function is injectable so overrides can be applied from any
//! key/value source, not only the process environment.

use crate::error::{ConfigError, ConfigResult};

/// Prefix applied to every gate environment variable
pub const ENV_PREFIX: &str = "VIRTUOHUB_GATE_";

type Lookup = Box<dyn Fn(&str) -> Option<String>>;

/// Prefixed environment reader
pub struct Env {
	prefix: String,
	lookup: Lookup,
}

impl Env {
	/// Reader over the process environment with [`ENV_PREFIX`].
	pub fn new() -> Self {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	/// Reader over an arbitrary key/value source.
	///
	/// # Examples
	///
	/// ```
	/// use virtuohub_conf::Env;
	///
	/// let env = Env::from_lookup(|key| {
	///     (key == "VIRTUOHUB_GATE_REPLAY_ON_SIGN_IN").then(|| "false".to_string())
	/// });
	/// assert_eq!(env.bool("REPLAY_ON_SIGN_IN").unwrap(), Some(false));
	/// ```
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String> + 'static,
	{
		Self {
			prefix: ENV_PREFIX.to_string(),
			lookup: Box::new(lookup),
		}
	}

	/// Replace the key prefix.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	/// Full variable name for `key`.
	pub fn key_name(&self, key: &str) -> String {
		format!("{}{}", self.prefix, key)
	}

	/// Raw string value, if set.
	pub fn str(&self, key: &str) -> Option<String> {
		(self.lookup)(&self.key_name(key))
	}

	/// Boolean value, if set.
	pub fn bool(&self, key: &str) -> ConfigResult<Option<bool>> {
		let full_key = self.key_name(key);
		match (self.lookup)(&full_key) {
			Some(val) => parse_bool(&val).map(Some).ok_or(ConfigError::EnvParse {
				key: full_key,
				value_len: val.len(),
			}),
			None => Ok(None),
		}
	}
}

impl Default for Env {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Env {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Env")
			.field("prefix", &self.prefix)
			.field("lookup", &"<function>")
			.finish()
	}
}

/// Parse common boolean spellings.
pub fn parse_bool(value: &str) -> Option<bool> {
	match value.trim().to_lowercase().as_str() {
		"1" | "true" | "yes" | "on" => Some(true),
		"0" | "false" | "no" | "off" => Some(false),
		_ => None,
	}
}
