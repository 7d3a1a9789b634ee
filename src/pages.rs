//! Gated components for the community feed.
//!
//! Each component registers a replay handler when mounted and unregisters it
//! when dropped, so a guest's action is replayed by the component that
//! captured it:
//!
//! - **PostComposer**: threads and polls
//! - **CommentBox**: comments on one post
//! - **PollWidget**: votes on one poll

pub use virtuohub_pages::*;
