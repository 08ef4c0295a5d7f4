//! Document-store collaborator interfaces.
//!
//! Implementations guarantee atomic single-document writes only; sequences
//! of writes are not transactional. Uniqueness constraints (author name,
//! book title, username) are enforced per document and reported as user
//! input errors.

use async_trait::async_trait;

use super::model::{Author, Book, User};
use crate::error::AppResult;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn book_count(&self) -> AppResult<u64>;
    async fn author_count(&self) -> AppResult<u64>;
    async fn all_books(&self) -> AppResult<Vec<Book>>;
    async fn all_authors(&self) -> AppResult<Vec<Author>>;
    async fn find_author_by_id(&self, id: &str) -> AppResult<Option<Author>>;
    async fn find_author_by_name(&self, name: &str) -> AppResult<Option<Author>>;
    async fn insert_author(&self, author: &Author) -> AppResult<()>;
    async fn insert_book(&self, book: &Book) -> AppResult<()>;
    /// Count of books whose author reference equals the given author id.
    async fn book_count_by_author(&self, author_id: &str) -> AppResult<u64>;
    /// Set the birth year of the author with this exact name and return the
    /// updated record, or None when no such author exists.
    async fn set_author_born(&self, name: &str, born: i32) -> AppResult<Option<Author>>;
}

/// Lookup of user records by internal id or unique username.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn insert_user(&self, user: &User) -> AppResult<()>;
}
