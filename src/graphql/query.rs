//! Read-side resolvers. Reads never require authentication.

use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::catalog::model::{Author, Book, User};
use crate::catalog::store::CatalogStore;
use crate::identity::RequestContext;

pub struct Query;

#[Object]
impl Query {
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        Ok(store.book_count().await.map_err(|e| e.extend())? as i32)
    }

    async fn author_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        Ok(store.author_count().await.map_err(|e| e.extend())? as i32)
    }

    /// Returns every book. The author and genre filter arguments are part
    /// of the contract but are currently accepted and ignored.
    async fn all_books(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> Result<Vec<Book>> {
        if author.is_some() || genre.is_some() {
            tracing::debug!(target: "graphql", ?author, ?genre, "allBooks filters ignored");
        }
        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        store.all_books().await.map_err(|e| e.extend())
    }

    async fn all_authors(&self, ctx: &Context<'_>) -> Result<Vec<Author>> {
        let store = ctx.data::<Arc<dyn CatalogStore>>()?;
        store.all_authors().await.map_err(|e| e.extend())
    }

    /// The user authenticated on this request, if any.
    async fn me(&self, ctx: &Context<'_>) -> Result<Option<User>> {
        Ok(ctx.data::<RequestContext>()?.current_user.clone())
    }
}
