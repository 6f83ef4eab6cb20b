//! SQLite-based storage implementation

use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use super::{AdminBook, BookStore, NewBook, NewUser, StoreResult, User, UserStore};
use crate::error::ApiError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// SQLite-based store implementing both UserStore and BookStore
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path
    pub fn open(path: &str) -> Result<Self, ApiError> {
        let conn = Connection::open(path).map_err(|e| ApiError::Internal(e.to_string()))?;

        Self::migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run database migrations
    fn migrate(conn: &Connection) -> Result<(), ApiError> {
        let current_version = Self::get_schema_version(conn)?;

        if current_version < SCHEMA_VERSION {
            tracing::info!(
                current = current_version,
                target = SCHEMA_VERSION,
                "Running database migrations"
            );

            if current_version < 1 {
                Self::migrate_v1(conn)?;
            }

            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )
            .map_err(|e| ApiError::Internal(e.to_string()))?;

            tracing::info!("Database migrations complete");
        }

        Ok(())
    }

    /// Get current schema version (0 if no schema exists)
    fn get_schema_version(conn: &Connection) -> Result<i32, ApiError> {
        let table_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
                [],
                |row| row.get(0),
            )
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        if !table_exists {
            return Ok(0);
        }

        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0).map(|v| v.unwrap_or(0))
        })
        .map_err(|e| ApiError::Internal(e.to_string()))
    }

    /// Migration to version 1: initial schema
    fn migrate_v1(conn: &Connection) -> Result<(), ApiError> {
        conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Users
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                password TEXT NOT NULL,
                email TEXT NOT NULL,
                role TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);

            -- Admin books
            CREATE TABLE IF NOT EXISTS admin_books (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                publisher TEXT NOT NULL,
                year TEXT NOT NULL,
                format TEXT NOT NULL,
                size TEXT,
                language TEXT NOT NULL,
                img_url TEXT,
                storage_key TEXT NOT NULL,
                description TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(())
    }
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        email: row.get(3)?,
        role: row.get(4)?,
    })
}

fn book_from_row(row: &Row) -> rusqlite::Result<AdminBook> {
    Ok(AdminBook {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        publisher: row.get(3)?,
        year: row.get(4)?,
        format: row.get(5)?,
        size: row.get(6)?,
        language: row.get(7)?,
        img_url: row.get(8)?,
        storage_key: row.get(9)?,
        description: row.get(10)?,
    })
}

const USER_COLUMNS: &str = "id, username, password, email, role";
const BOOK_COLUMNS: &str =
    "id, title, author, publisher, year, format, size, language, img_url, storage_key, description";

impl UserStore for SqliteStore {
    fn create(&self, user: NewUser) -> StoreResult<User> {
        let conn = self.conn.lock().unwrap();
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: user.username,
            password: user.password,
            email: user.email,
            role: user.role,
        };

        conn.execute(
            "INSERT INTO users (id, username, password, email, role) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![user.id, user.username, user.password, user.email, user.role],
        )
        .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(user)
    }

    fn get(&self, id: &str) -> StoreResult<Option<User>> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
            params![id],
            user_from_row,
        )
        .optional()
        .map_err(|e| ApiError::Internal(e.to_string()))
    }

    fn list(&self) -> StoreResult<Vec<User>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY rowid"))
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let users = stmt
            .query_map([], user_from_row)
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(users)
    }

    fn find_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
            params![username],
            user_from_row,
        )
        .optional()
        .map_err(|e| ApiError::Internal(e.to_string()))
    }

    fn update(&self, user: &User) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "UPDATE users SET username = ?2, password = ?3, email = ?4, role = ?5 WHERE id = ?1",
            params![user.id, user.username, user.password, user.email, user.role],
        )
        .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();

        let affected = conn
            .execute("DELETE FROM users WHERE id = ?1", params![id])
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(affected > 0)
    }
}

impl BookStore for SqliteStore {
    fn create(&self, book: NewBook) -> StoreResult<AdminBook> {
        let conn = self.conn.lock().unwrap();
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

        conn.execute(
            "INSERT INTO admin_books (id, title, author, publisher, year, format, size, language, img_url, storage_key, description)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                book.id,
                book.title,
                book.author,
                book.publisher,
                book.year,
                book.format,
                book.size,
                book.language,
                book.img_url,
                book.storage_key,
                book.description
            ],
        )
        .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(book)
    }

    fn get(&self, id: &str) -> StoreResult<Option<AdminBook>> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            &format!("SELECT {BOOK_COLUMNS} FROM admin_books WHERE id = ?1"),
            params![id],
            book_from_row,
        )
        .optional()
        .map_err(|e| ApiError::Internal(e.to_string()))
    }

    fn list(&self) -> StoreResult<Vec<AdminBook>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {BOOK_COLUMNS} FROM admin_books ORDER BY rowid"
            ))
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let books = stmt
            .query_map([], book_from_row)
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(books)
    }

    fn find_by_title_containing(&self, fragment: &str) -> StoreResult<Vec<AdminBook>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(&format!(
                "SELECT {BOOK_COLUMNS} FROM admin_books
                 WHERE lower(title) LIKE '%' || lower(?1) || '%'
                 ORDER BY rowid"
            ))
            .map_err(|e| ApiError::Internal(e.to_string()))?;
        let books = stmt
            .query_map(params![fragment], book_from_row)
            .map_err(|e| ApiError::Internal(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(books)
    }

    fn update(&self, book: &AdminBook) -> StoreResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "UPDATE admin_books SET title = ?2, author = ?3, publisher = ?4, year = ?5,
             format = ?6, size = ?7, language = ?8, img_url = ?9, storage_key = ?10,
             description = ?11 WHERE id = ?1",
            params![
                book.id,
                book.title,
                book.author,
                book.publisher,
                book.year,
                book.format,
                book.size,
                book.language,
                book.img_url,
                book.storage_key,
                book.description
            ],
        )
        .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(())
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();

        let affected = conn
            .execute("DELETE FROM admin_books WHERE id = ?1", params![id])
            .map_err(|e| ApiError::Internal(e.to_string()))?;

        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store() -> SqliteStore {
        SqliteStore::open(":memory:").unwrap()
    }

    fn sample_book(title: &str) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Frank Herbert".to_string(),
            publisher: "Chilton".to_string(),
            year: "1965".to_string(),
            format: "pdf".to_string(),
            size: Some("2 MB".to_string()),
            language: "English".to_string(),
            img_url: None,
            storage_key: "abc-dune.pdf".to_string(),
            description: "Desert planet".to_string(),
        }
    }

    #[test]
    fn test_user_roundtrip() {
        let store = open_store();

        let user = UserStore::create(
            &store,
            NewUser {
                username: "alice".to_string(),
                password: "secret".to_string(),
                email: "alice@example.com".to_string(),
                role: "user".to_string(),
            },
        )
        .unwrap();

        let found = store.find_by_username("alice").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password, "secret");

        assert!(UserStore::delete(&store, &user.id).unwrap());
        assert!(!UserStore::delete(&store, &user.id).unwrap());
    }

    #[test]
    fn test_book_roundtrip_preserves_optionals() {
        let store = open_store();

        let book = BookStore::create(&store, sample_book("Dune")).unwrap();
        let found = BookStore::get(&store, &book.id).unwrap().unwrap();
        assert_eq!(found.size.as_deref(), Some("2 MB"));
        assert_eq!(found.img_url, None);
        assert_eq!(found.storage_key, "abc-dune.pdf");
    }

    #[test]
    fn test_title_search_ignores_case_and_orders_by_insertion() {
        let store = open_store();
        BookStore::create(&store, sample_book("DUNE Messiah")).unwrap();
        BookStore::create(&store, sample_book("Children of Dune")).unwrap();
        BookStore::create(&store, sample_book("Foundation")).unwrap();

        let hits = store.find_by_title_containing("dune").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "DUNE Messiah");
        assert_eq!(hits[1].title, "Children of Dune");
    }

    #[test]
    fn test_update_overwrites_storage_key() {
        let store = open_store();
        let mut book = BookStore::create(&store, sample_book("Dune")).unwrap();

        book.storage_key = "def-dune-v2.pdf".to_string();
        BookStore::update(&store, &book).unwrap();

        let found = BookStore::get(&store, &book.id).unwrap().unwrap();
        assert_eq!(found.storage_key, "def-dune-v2.pdf");
    }

    #[test]
    fn test_migration_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");
        let path = path.to_str().unwrap();

        {
            let store = SqliteStore::open(path).unwrap();
            UserStore::create(
                &store,
                NewUser {
                    username: "bob".to_string(),
                    password: "pw".to_string(),
                    email: "bob@example.com".to_string(),
                    role: "user".to_string(),
                },
            )
            .unwrap();
        }

        // Reopening must not recreate or clobber existing tables
        let store = SqliteStore::open(path).unwrap();
        assert!(store.find_by_username("bob").unwrap().is_some());
    }
}
