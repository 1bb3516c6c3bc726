//! Process-local read model storage.

pub mod store;

pub use store::{InMemoryStore, InsightStore, KeyedStore};
