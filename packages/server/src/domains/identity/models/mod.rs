pub mod alias;

pub use alias::AliasRecord;
