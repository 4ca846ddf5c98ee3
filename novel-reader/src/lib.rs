//! Browser-independent logic for the novel site front-end.
//!
//! The bounded reading history ([`history::HistoryStore`]) sits on top of a
//! [`storage::StorageBackend`]; the web crate supplies localStorage and
//! cookie backends, tests use the in-memory ones here.

pub mod api;
pub mod config;
pub mod cookie;
pub mod error;
pub mod forms;
pub mod history;
pub mod reader;
pub mod settings;
pub mod storage;

pub use config::{Endpoints, SiteConfig};
pub use error::{ReaderError, Result};
pub use history::{HistoryEntry, HistoryStore};
pub use settings::ReaderSettings;
pub use storage::{BackendKind, StorageBackend};
