//! In-memory document store, used by tests and by demo mode when no
//! MongoDB connection string is configured. Collections are plain vectors
//! behind read-write locks; insertion order is preserved.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::model::{Author, Book, User};
use super::store::{CatalogStore, UserDirectory};
use crate::error::{AppError, AppResult};

#[derive(Default)]
pub struct MemoryCatalog {
    authors: RwLock<Vec<Author>>,
    books: RwLock<Vec<Book>>,
    users: RwLock<Vec<User>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn book_count(&self) -> AppResult<u64> {
        Ok(self.books.read().len() as u64)
    }

    async fn author_count(&self) -> AppResult<u64> {
        Ok(self.authors.read().len() as u64)
    }

    async fn all_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().clone())
    }

    async fn all_authors(&self) -> AppResult<Vec<Author>> {
        Ok(self.authors.read().clone())
    }

    async fn find_author_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        Ok(self.authors.read().iter().find(|a| a.id == id).cloned())
    }

    async fn find_author_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        Ok(self.authors.read().iter().find(|a| a.name == name).cloned())
    }

    async fn insert_author(&self, author: &Author) -> AppResult<()> {
        let mut authors = self.authors.write();
        if authors.iter().any(|a| a.name == author.name) {
            return Err(AppError::user("duplicate_author", format!("author already exists: {}", author.name)));
        }
        authors.push(author.clone());
        Ok(())
    }

    async fn insert_book(&self, book: &Book) -> AppResult<()> {
        let mut books = self.books.write();
        if books.iter().any(|b| b.title == book.title) {
            return Err(AppError::user("duplicate_title", format!("book already exists: {}", book.title)));
        }
        books.push(book.clone());
        Ok(())
    }

    async fn book_count_by_author(&self, author_id: &str) -> AppResult<u64> {
        Ok(self.books.read().iter().filter(|b| b.author_id == author_id).count() as u64)
    }

    async fn set_author_born(&self, name: &str, born: i32) -> AppResult<Option<Author>> {
        let mut authors = self.authors.write();
        match authors.iter_mut().find(|a| a.name == name) {
            Some(author) => {
                author.born = Some(born);
                Ok(Some(author.clone()))
            }
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserDirectory for MemoryCatalog {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().iter().find(|u| u.username == username).cloned())
    }

    async fn insert_user(&self, user: &User) -> AppResult<()> {
        let mut users = self.users.write();
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::user("duplicate_username", format!("username already exists: {}", user.username)));
        }
        users.push(user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_inserts_are_rejected_and_leave_counts_unchanged() {
        let store = MemoryCatalog::new();
        let author = Author::new("Sandi Metz", None);
        store.insert_author(&author).await.unwrap();
        let err = store.insert_author(&Author::new("Sandi Metz", Some(1960))).await.unwrap_err();
        assert_eq!(err.graphql_code(), "BAD_USER_INPUT");
        assert_eq!(store.author_count().await.unwrap(), 1);

        let book = Book::new("POODR", 2012, vec!["design".into()], author.id.clone());
        store.insert_book(&book).await.unwrap();
        let err = store.insert_book(&Book::new("POODR", 2013, vec![], author.id.clone())).await.unwrap_err();
        assert_eq!(err.graphql_code(), "BAD_USER_INPUT");
        assert_eq!(store.book_count().await.unwrap(), 1);

        let user = User::new("alice", "design");
        store.insert_user(&user).await.unwrap();
        assert!(store.insert_user(&User::new("alice", "crime")).await.is_err());
        assert_eq!(store.find_by_username("alice").await.unwrap().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn set_author_born_updates_existing_and_misses_unknown() {
        let store = MemoryCatalog::new();
        store.insert_author(&Author::new("Robert Martin", None)).await.unwrap();
        let updated = store.set_author_born("Robert Martin", 1952).await.unwrap().unwrap();
        assert_eq!(updated.born, Some(1952));
        assert_eq!(store.find_author_by_name("Robert Martin").await.unwrap().unwrap().born, Some(1952));
        assert!(store.set_author_born("Nobody", 1900).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn book_count_by_author_filters_on_reference() {
        let store = MemoryCatalog::new();
        let fowler = Author::new("Martin Fowler", Some(1963));
        let metz = Author::new("Sandi Metz", None);
        store.insert_author(&fowler).await.unwrap();
        store.insert_author(&metz).await.unwrap();
        store.insert_book(&Book::new("Refactoring", 2018, vec!["refactoring".into()], fowler.id.clone())).await.unwrap();
        store.insert_book(&Book::new("POODR", 2012, vec!["design".into()], metz.id.clone())).await.unwrap();
        assert_eq!(store.book_count_by_author(&fowler.id).await.unwrap(), 1);
        assert_eq!(store.book_count_by_author("no-such-id").await.unwrap(), 0);
    }
}
