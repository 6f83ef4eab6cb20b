//! Storage abstractions for users and admin books

pub mod memory;
pub mod models;
pub mod sqlite;

pub use memory::{InMemoryBookStore, InMemoryUserStore};
pub use models::*;
pub use sqlite::SqliteStore;

use crate::error::ApiError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, ApiError>;

/// Trait for user storage.
///
/// Lookups signal a miss with `Option`/`bool` rather than an error. Username
/// uniqueness is the caller's concern, enforced at creation time only.
pub trait UserStore: Send + Sync {
    /// Create a user, generating its id
    fn create(&self, user: NewUser) -> StoreResult<User>;

    /// Get a user by id
    fn get(&self, id: &str) -> StoreResult<Option<User>>;

    /// List all users
    fn list(&self) -> StoreResult<Vec<User>>;

    /// Find a user by exact username
    fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;

    /// Overwrite an existing user record
    fn update(&self, user: &User) -> StoreResult<()>;

    /// Delete a user by id; returns whether a record existed
    fn delete(&self, id: &str) -> StoreResult<bool>;
}

/// Trait for admin book storage
pub trait BookStore: Send + Sync {
    /// Create a book record, generating its id
    fn create(&self, book: NewBook) -> StoreResult<AdminBook>;

    /// Get a book by id
    fn get(&self, id: &str) -> StoreResult<Option<AdminBook>>;

    /// List all book records
    fn list(&self) -> StoreResult<Vec<AdminBook>>;

    /// Find books whose title contains the fragment, case-insensitively
    fn find_by_title_containing(&self, fragment: &str) -> StoreResult<Vec<AdminBook>>;

    /// Overwrite an existing book record
    fn update(&self, book: &AdminBook) -> StoreResult<()>;

    /// Delete a book by id; returns whether a record existed
    fn delete(&self, id: &str) -> StoreResult<bool>;
}
