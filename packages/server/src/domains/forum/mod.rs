//! Forum domain - posts, threaded comments, and the live submission flow.

pub mod actions;
pub mod data;
pub mod events;
pub mod models;

pub use models::*;
