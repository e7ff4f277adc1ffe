//! App glue for a per-character chat application: a static route table
//! (`/` and `/chat/:name`) and a chat history store snapshotted to
//! durable storage after every change. Views, rendering, and the shell
//! that drives navigation live outside this crate.

pub mod models;
pub mod router;
pub mod services;

pub use models::{Message, Role};
pub use router::{Route, RouteMatch, Router, View};
pub use services::history_service::{ChatHistoryStore, HistoryError, HISTORY_KEY};
pub use services::storage::{FileStorage, MemoryStorage, Storage, StorageError};
