//! Taskhive repository client
//!
//! An async CRUD façade over an external record store, plus the local
//! store that owns the in-memory collection and merges CRUD responses.
//! Two backends implement the same contract: an HTTP backend talking to
//! the hosted service and an in-memory fixture backend.

pub mod backend;
pub mod error;
pub mod http;
pub mod memory;
pub mod store;

pub use backend::TaskBackend;
pub use error::{ClientError, Result};
pub use http::HttpBackend;
pub use memory::InMemoryBackend;
pub use store::{LoadState, TaskStore};
