//! MongoDB-backed catalog store over the authors, books and users
//! collections. Uniqueness is enforced by unique indexes created at
//! connect time; duplicate-key write failures surface as user input errors.

use anyhow::Context;
use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::doc;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};

use super::model::{Author, Book, User};
use super::store::{CatalogStore, UserDirectory};
use crate::error::{AppError, AppResult};

pub struct MongoCatalog {
    authors: Collection<Author>,
    books: Collection<Book>,
    users: Collection<User>,
}

impl MongoCatalog {
    pub async fn connect(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("While connecting to MongoDB")?;
        let db = client.database(db_name);
        let catalog = Self {
            authors: db.collection("authors"),
            books: db.collection("books"),
            users: db.collection("users"),
        };
        catalog
            .ensure_indexes()
            .await
            .context("While creating unique indexes")?;
        Ok(catalog)
    }

    async fn ensure_indexes(&self) -> mongodb::error::Result<()> {
        fn unique(keys: mongodb::bson::Document) -> IndexModel {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build()
        }
        self.authors.create_index(unique(doc! { "name": 1 })).await?;
        self.books.create_index(unique(doc! { "title": 1 })).await?;
        self.users.create_index(unique(doc! { "username": 1 })).await?;
        Ok(())
    }
}

fn store_err(err: mongodb::error::Error) -> AppError {
    AppError::internal("store", err.to_string())
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == 11000
    )
}

fn write_err(err: mongodb::error::Error, code: &str, msg: String) -> AppError {
    if is_duplicate_key(&err) {
        AppError::user(code, msg)
    } else {
        store_err(err)
    }
}

#[async_trait]
impl CatalogStore for MongoCatalog {
    async fn book_count(&self) -> AppResult<u64> {
        self.books.count_documents(doc! {}).await.map_err(store_err)
    }

    async fn author_count(&self) -> AppResult<u64> {
        self.authors.count_documents(doc! {}).await.map_err(store_err)
    }

    async fn all_books(&self) -> AppResult<Vec<Book>> {
        let cursor = self.books.find(doc! {}).await.map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn all_authors(&self) -> AppResult<Vec<Author>> {
        let cursor = self.authors.find(doc! {}).await.map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn find_author_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        self.authors.find_one(doc! { "id": id }).await.map_err(store_err)
    }

    async fn find_author_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        self.authors.find_one(doc! { "name": name }).await.map_err(store_err)
    }

    async fn insert_author(&self, author: &Author) -> AppResult<()> {
        self.authors
            .insert_one(author)
            .await
            .map(|_| ())
            .map_err(|e| write_err(e, "duplicate_author", format!("author already exists: {}", author.name)))
    }

    async fn insert_book(&self, book: &Book) -> AppResult<()> {
        self.books
            .insert_one(book)
            .await
            .map(|_| ())
            .map_err(|e| write_err(e, "duplicate_title", format!("book already exists: {}", book.title)))
    }

    async fn book_count_by_author(&self, author_id: &str) -> AppResult<u64> {
        self.books
            .count_documents(doc! { "author_id": author_id })
            .await
            .map_err(store_err)
    }

    async fn set_author_born(&self, name: &str, born: i32) -> AppResult<Option<Author>> {
        self.authors
            .find_one_and_update(doc! { "name": name }, doc! { "$set": { "born": born } })
            .return_document(ReturnDocument::After)
            .await
            .map_err(store_err)
    }
}

#[async_trait]
impl UserDirectory for MongoCatalog {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.users.find_one(doc! { "id": id }).await.map_err(store_err)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.users.find_one(doc! { "username": username }).await.map_err(store_err)
    }

    async fn insert_user(&self, user: &User) -> AppResult<()> {
        self.users
            .insert_one(user)
            .await
            .map(|_| ())
            .map_err(|e| write_err(e, "duplicate_username", format!("username already exists: {}", user.username)))
    }
}
