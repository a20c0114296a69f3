//! Identity domain - stable pseudonymous aliases for opaque caller tokens.

pub mod generator;
pub mod models;

pub use models::*;
