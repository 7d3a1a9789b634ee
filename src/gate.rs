//! Intent store, replay handler registry and auth modal binding.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use virtuohub::GateSettings;
//! use virtuohub::core::MessagesContainer;
//! use virtuohub::gate::AuthGate;
//!
//! let gate = AuthGate::new(GateSettings::default(), Arc::new(MessagesContainer::new()));
//! assert!(!gate.store().request_sign_in());
//! ```

pub use virtuohub_gate::*;
