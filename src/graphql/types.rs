//! GraphQL object types over the catalog documents.
//!
//! The catalog structs stay plain serde documents; their GraphQL surface
//! lives here so the store implementations never see the executor.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result, SimpleObject, ID};

use crate::catalog::model::{Author, Book, User};
use crate::catalog::store::CatalogStore;
use crate::error::AppError;

/// Issued bearer token, as returned by `login`.
#[derive(SimpleObject)]
pub struct Token {
    pub value: String,
}

#[Object]
impl Book {
    async fn id(&self) -> ID {
        ID::from(self.id.clone())
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn published(&self) -> i32 {
        self.published
    }

    async fn genres(&self) -> &[String] {
        &self.genres
    }

    /// Resolves the referenced author record.
    async fn author(&self, ctx: &Context<'_>) -> Result<Author> {
        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        store
            .find_author_by_id(&self.author_id)
            .await
            .map_err(|e| e.extend())?
            .ok_or_else(|| AppError::internal("dangling_author", "book references a missing author").extend())
    }
}

#[Object]
impl Author {
    async fn id(&self) -> ID {
        ID::from(self.id.clone())
    }

    async fn name(&self) -> &str {
        &self.name
    }

    async fn born(&self) -> Option<i32> {
        self.born
    }

    /// Number of books referencing this author.
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        let count = store.book_count_by_author(&self.id).await.map_err(|e| e.extend())?;
        Ok(count as i32)
    }
}

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID::from(self.id.clone())
    }

    async fn username(&self) -> &str {
        &self.username
    }

    async fn favorite_genre(&self) -> &str {
        &self.favorite_genre
    }
}
