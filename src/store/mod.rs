//! Configuration tree used for save/load.
//!
//! The host's persistent store is a hierarchical key/value tree. [`Section`]
//! is the in-memory form the engine reads from and writes into; hosts
//! convert to and from their own file format (JSON via serde works as-is).

mod section;

pub use section::{Section, Value};
