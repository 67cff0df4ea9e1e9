//! In-memory storage backend.
//!
//! Stores games in a `BTreeMap` keyed by id so pages come out in id order.
//! Nothing is persisted; data is lost when the repository is dropped.

mod repository;

pub use repository::InMemoryRepository;
