//! Storage layer: the backend trait, its implementations, and record types.
//!
//! - **traits**: `DocumentBackend`, the injected store handle
//! - **memory**: in-process backend (tests, tooling)
//! - **sqlite**: file-backed backend built on rusqlite
//! - **filter**: single-field query predicates
//! - **validation**: input checks applied before any backend call

pub mod filter;
pub mod memory;
pub mod sqlite;
pub mod traits;
pub mod types;
pub mod validation;

pub use filter::{Filter, FilterOp};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use traits::DocumentBackend;
pub use types::{Document, Fields, CREATED_AT_FIELD, ID_FIELD, UPDATED_AT_FIELD};
