pub mod collection;
pub mod json_backend;

pub use collection::{LoadOutcome, PersistentCollection};
