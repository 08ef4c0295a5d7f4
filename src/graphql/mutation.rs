//! Write-side resolvers.
//!
//! Catalog mutations require an authenticated user on the request context;
//! the check runs before any store access so a rejected mutation performs
//! no write. `createUser` and `login` are open by design.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::catalog::model::{Author, Book, User};
use crate::catalog::store::{CatalogStore, UserDirectory};
use crate::error::{AppError, AppResult};
use crate::graphql::types::Token;
use crate::identity::{CredentialCheck, RequestContext, TokenCodec};

pub struct Mutation;

/// Argument validation for addBook, run before any write so a plain
/// validation failure can never leave a freshly created author behind.
fn validate_new_book(title: &str, author: &str, published: i32) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::user("invalid_title", "title must not be empty"));
    }
    if author.trim().is_empty() {
        return Err(AppError::user("invalid_author", "author name must not be empty"));
    }
    if published < 0 {
        return Err(AppError::user(
            "invalid_published",
            format!("published year must not be negative: {}", published),
        ));
    }
    Ok(())
}

#[Object]
impl Mutation {
    /// Adds a book, creating its author on first reference.
    ///
    /// The author insert and the book insert are two independent writes;
    /// if the book insert fails the author stays committed.
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        author: String,
        published: i32,
        genres: Vec<String>,
    ) -> Result<Option<Book>> {
        ctx.data::<RequestContext>()?.require_user().map_err(|e| e.extend())?;
        validate_new_book(&title, &author, published).map_err(|e| e.extend())?;

        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        let author_rec = match store.find_author_by_name(&author).await.map_err(|e| e.extend())? {
            Some(existing) => existing,
            None => {
                let created = Author::new(author.clone(), None);
                store.insert_author(&created).await.map_err(|e| e.extend())?;
                created
            }
        };

        let book = Book::new(title, published, genres, author_rec.id);
        store.insert_book(&book).await.map_err(|e| e.extend())?;
        Ok(Some(book))
    }

    /// Sets the birth year of an existing author.
    async fn edit_author(&self, ctx: &Context<'_>, name: String, born: i32) -> Result<Option<Author>> {
        ctx.data::<RequestContext>()?.require_user().map_err(|e| e.extend())?;
        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        match store.set_author_born(&name, born).await.map_err(|e| e.extend())? {
            Some(author) => Ok(Some(author)),
            None => Err(AppError::not_found("author_not_found", format!("author not found: {}", name)).extend()),
        }
    }

    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        favorite_genre: String,
    ) -> Result<Option<User>> {
        if username.trim().is_empty() {
            return Err(AppError::user("invalid_username", "username must not be empty").extend());
        }
        let users = ctx.data::<Arc<dyn UserDirectory>>()?;
        let user = User::new(username, favorite_genre);
        users.insert_user(&user).await.map_err(|e| e.extend())?;
        Ok(Some(user))
    }

    /// Validates credentials and issues a bearer token.
    async fn login(&self, ctx: &Context<'_>, username: String, password: String) -> Result<Option<Token>> {
        let users = ctx.data::<Arc<dyn UserDirectory>>()?;
        let credentials = ctx.data::<Arc<dyn CredentialCheck>>()?;
        let codec = ctx.data::<Arc<TokenCodec>>()?;

        // One undifferentiated failure for unknown user and bad password,
        // so responses cannot be used to enumerate usernames.
        let Some(user) = users.find_by_username(&username).await.map_err(|e| e.extend())? else {
            return Err(AppError::user("wrong_credentials", "wrong credentials").extend());
        };
        if !credentials.verify(&user, &password) {
            return Err(AppError::user("wrong_credentials", "wrong credentials").extend());
        }

        let value = codec.issue(&user.username, &user.id).map_err(|e| e.extend())?;
        Ok(Some(Token { value }))
    }
}
