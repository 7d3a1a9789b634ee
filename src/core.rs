//! Shared intent, auth, message and error types.
//!
//! # Examples
//!
//! ```rust
//! use virtuohub::core::{ActionKind, Intent};
//!
//! let intent = Intent::from_json(r#"{"action":"cast_vote","data":{"pollId":"P1","optionIndex":0}}"#).unwrap();
//! assert_eq!(intent.action(), ActionKind::CastVote);
//! ```

pub use virtuohub_core::*;
