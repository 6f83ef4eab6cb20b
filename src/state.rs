//! Application state

use std::sync::Arc;

use crate::search::SearchProvider;
use crate::storage::ObjectStorage;
use crate::store::{BookStore, UserStore};

/// Shared application state, generic over the four collaborator seams so
/// tests can substitute in-memory fakes.
pub struct AppState<U, B, O, P>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    pub users: Arc<U>,
    pub books: Arc<B>,
    pub storage: Arc<O>,
    pub search: Arc<P>,
}

impl<U, B, O, P> AppState<U, B, O, P>
where
    U: UserStore,
    B: BookStore,
    O: ObjectStorage,
    P: SearchProvider,
{
    pub fn new(users: Arc<U>, books: Arc<B>, storage: Arc<O>, search: Arc<P>) -> Self {
        Self {
            users,
            books,
            storage,
            search,
        }
    }
}
