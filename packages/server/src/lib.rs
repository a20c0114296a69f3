// Haven Forum - API Core
//
// This crate provides the anonymous, AI-moderated live discussion forum for
// the Haven wellness app: pseudonymous identities, a moderation pipeline in
// front of every submission, a threaded post/comment store, and a live feed
// that fans accepted content out to connected readers.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
