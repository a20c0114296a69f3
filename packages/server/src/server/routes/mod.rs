// HTTP routes
pub mod aliases;
pub mod health;
pub mod posts;
pub mod stream;

pub use aliases::*;
pub use health::*;
pub use posts::*;
pub use stream::*;
