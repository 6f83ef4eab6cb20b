//! In-memory storage implementations

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use super::{AdminBook, BookStore, NewBook, NewUser, StoreResult, User, UserStore};

/// In-memory user store
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn create(&self, user: NewUser) -> StoreResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: user.username,
            password: user.password,
            email: user.email,
            role: user.role,
        };
        self.users
            .write()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn get(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.users.read().unwrap().get(id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.read().unwrap().values().cloned().collect())
    }

    fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .unwrap()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    fn update(&self, user: &User) -> StoreResult<()> {
        self.users
            .write()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.users.write().unwrap().remove(id).is_some())
    }
}

/// In-memory book store
pub struct InMemoryBookStore {
    books: RwLock<HashMap<String, AdminBook>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBookStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BookStore for InMemoryBookStore {
    fn create(&self, book: NewBook) -> StoreResult<AdminBook> {
        let book = AdminBook {
            id: Uuid::new_v4().to_string(),
            title: book.title,
            author: book.author,
            publisher: book.publisher,
            year: book.year,
            format: book.format,
            size: book.size,
            language: book.language,
            img_url: book.img_url,
            storage_key: book.storage_key,
            description: book.description,
        };
        self.books
            .write()
            .unwrap()
            .insert(book.id.clone(), book.clone());
        Ok(book)
    }

    fn get(&self, id: &str) -> StoreResult<Option<AdminBook>> {
        Ok(self.books.read().unwrap().get(id).cloned())
    }

    fn list(&self) -> StoreResult<Vec<AdminBook>> {
        Ok(self.books.read().unwrap().values().cloned().collect())
    }

    fn find_by_title_containing(&self, fragment: &str) -> StoreResult<Vec<AdminBook>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .books
            .read()
            .unwrap()
            .values()
            .filter(|b| b.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn update(&self, book: &AdminBook) -> StoreResult<()> {
        self.books
            .write()
            .unwrap()
            .insert(book.id.clone(), book.clone());
        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.books.write().unwrap().remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Author".to_string(),
            publisher: "Publisher".to_string(),
            year: "1965".to_string(),
            format: "pdf".to_string(),
            size: None,
            language: "English".to_string(),
            img_url: None,
            storage_key: "key".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_user_crud() {
        let store = InMemoryUserStore::new();

        let user = store
            .create(NewUser {
                username: "alice".to_string(),
                password: "secret".to_string(),
                email: "alice@example.com".to_string(),
                role: "admin".to_string(),
            })
            .unwrap();

        assert_eq!(
            store.find_by_username("alice").unwrap().unwrap().id,
            user.id
        );
        assert!(store.find_by_username("bob").unwrap().is_none());

        let mut updated = user.clone();
        updated.email = "new@example.com".to_string();
        store.update(&updated).unwrap();
        assert_eq!(
            store.get(&user.id).unwrap().unwrap().email,
            "new@example.com"
        );

        assert!(store.delete(&user.id).unwrap());
        assert!(!store.delete(&user.id).unwrap());
        assert!(store.get(&user.id).unwrap().is_none());
    }

    #[test]
    fn test_title_match_is_case_insensitive_substring() {
        let store = InMemoryBookStore::new();
        store.create(sample_book("Dune Messiah")).unwrap();
        store.create(sample_book("Foundation")).unwrap();

        let hits = store.find_by_title_containing("dune").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Dune Messiah");

        assert!(store.find_by_title_containing("xyzzy").unwrap().is_empty());
        // Empty fragment matches everything, like the backing query it mirrors
        assert_eq!(store.find_by_title_containing("").unwrap().len(), 2);
    }

    #[test]
    fn test_book_delete_miss_signals_false() {
        let store = InMemoryBookStore::new();
        assert!(!store.delete("missing").unwrap());
    }
}
