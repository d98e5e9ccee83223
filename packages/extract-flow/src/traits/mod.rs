//! Core trait abstractions.

pub mod names;
pub mod source;
pub mod store;

pub use names::{NameSource, SequentialNames, UuidNames};
pub use source::FileSource;
pub use store::{ObjectStore, StoreResponse};
