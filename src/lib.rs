//! KnowledgeHub backend
//!
//! A book-catalog web service: user accounts plus a catalog search that
//! merges locally administered books with results from an external
//! book-search provider.

pub mod config;
pub mod error;
pub mod routes;
pub mod search;
pub mod state;
pub mod storage;
pub mod store;

pub use config::{Config, SearchConfig, StorageConfig};
pub use error::ApiError;
pub use search::{
    aggregate_search, ExternalBookResult, HttpSearchClient, SearchProvider, SearchResultItem,
};
pub use state::AppState;
pub use storage::{MemoryObjectStorage, ObjectStorage, R2ObjectStorage, StorageOp};
pub use store::{
    AdminBook, BookStore, InMemoryBookStore, InMemoryUserStore, NewBook, NewUser, SqliteStore,
    StoreResult, User, UserStore,
};
