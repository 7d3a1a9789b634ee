//! Settings file loading tests

use std::fs::File;
use std::io::Write;

use rstest::rstest;
use serial_test::serial;
use tempfile::TempDir;
use virtuohub_conf::{ConfigError, GateSettings};
use virtuohub_core::AuthMode;

#[rstest]
#[serial]
fn test_load_file_then_environment() {
	// Arrange
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("virtuohub.toml");
	let mut file = File::create(&path).unwrap();
	writeln!(
		file,
		r#"
[gate]
failure_message = "Could not finish that"
default_auth_mode = "signup"
"#
	)
	.unwrap();

	// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
	// This test uses #[serial] to ensure exclusive access to environment variables.
	unsafe {
		std::env::set_var("VIRTUOHUB_GATE_REPLAY_ON_SIGN_IN", "false");
	}

	// Act
	let result = GateSettings::load(Some(&path));

	// SAFETY: see above.
	unsafe {
		std::env::remove_var("VIRTUOHUB_GATE_REPLAY_ON_SIGN_IN");
	}

	// Assert
	let settings = result.unwrap();
	assert_eq!(settings.failure_message, "Could not finish that");
	assert_eq!(settings.default_auth_mode, AuthMode::SignUp);
	assert!(!settings.replay_on_sign_in);
}

#[rstest]
#[serial]
fn test_load_without_file_uses_defaults() {
	let settings = GateSettings::load(None).unwrap();
	assert_eq!(settings, GateSettings::default());
}

#[rstest]
fn test_missing_file_reports_path() {
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("absent.toml");

	let err = GateSettings::from_toml_file(&path).unwrap_err();

	match err {
		ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
		other => panic!("unexpected error: {:?}", other),
	}
}

#[rstest]
fn test_application_file_with_gate_section() {
	// Arrange
	let temp_dir = TempDir::new().unwrap();
	let path = temp_dir.path().join("settings.toml");
	let mut file = File::create(&path).unwrap();
	writeln!(
		file,
		r#"
[server]
port = 8000

[gate]
default_auth_mode = "signup"
replay_on_sign_in = false

[database]
url = "postgres://localhost/virtuohub"
"#
	)
	.unwrap();

	// Act
	let settings = GateSettings::from_toml_file(&path).unwrap();

	// Assert
	assert_eq!(settings.default_auth_mode, AuthMode::SignUp);
	assert!(!settings.replay_on_sign_in);
}
