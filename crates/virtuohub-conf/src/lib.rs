//! # VirtuoHub Configuration
//!
//! Settings for the deferred-intent authentication gate.
//!
//! Settings are layered:
//!
//! 1. Built-in defaults ([`GateSettings::default`])
//! 2. An optional TOML file (a `[gate]` table or top-level keys)
//! 3. `VIRTUOHUB_GATE_*` environment variables
//!
//! ## Example
//!
//! ```
//! use virtuohub_conf::GateSettings;
//! use virtuohub_core::AuthMode;
//!
//! let settings = GateSettings::from_toml_str(r#"
//! [gate]
//! default_auth_mode = "signup"
//! "#).unwrap();
//!
//! assert_eq!(settings.default_auth_mode, AuthMode::SignUp);
//! assert!(settings.replay_on_sign_in);
//! ```

pub mod env;
pub mod error;
pub mod settings;

pub use env::{ENV_PREFIX, Env, parse_bool};
pub use error::{ConfigError, ConfigResult};
pub use settings::{DEFAULT_FAILURE_MESSAGE, GateSettings};
