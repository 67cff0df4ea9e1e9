//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `catalogue_core::storage`, selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): In-memory storage, lost on restart
//! - `sqlite`: SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time. The in-memory backend is always compiled for tests.
//!
//! # Examples
//!
//! Build with SQLite:
//! ```bash
//! cargo build -p catalogue --no-default-features --features sqlite,memory
//! ```

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'sqlite' feature. \
    Example: cargo build -p catalogue --features sqlite"
);

#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;

/// Name of the compiled-in storage backend, reported by `/healthz`.
#[cfg(feature = "inmemory")]
pub const BACKEND_NAME: &str = "inmemory";

#[cfg(feature = "sqlite")]
pub const BACKEND_NAME: &str = "sqlite";
