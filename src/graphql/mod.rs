//! GraphQL schema assembly.
//!
//! The schema is the resolver dispatch table, built once at startup with
//! the shared collaborators attached as context data. Per-request state
//! (the authentication context) rides on each request instead.

mod types;
mod query;
mod mutation;

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use crate::catalog::store::{CatalogStore, UserDirectory};
use crate::identity::{CredentialCheck, TokenCodec};

pub use mutation::Mutation;
pub use query::Query;
pub use types::Token;

pub type LibrariumSchema = Schema<Query, Mutation, EmptySubscription>;

pub fn build_schema(
    store: Arc<dyn CatalogStore>,
    users: Arc<dyn UserDirectory>,
    codec: Arc<TokenCodec>,
    credentials: Arc<dyn CredentialCheck>,
) -> LibrariumSchema {
    Schema::build(Query, Mutation, EmptySubscription)
        .data(store)
        .data(users)
        .data(codec)
        .data(credentials)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MemoryCatalog;
    use crate::identity::SharedSecretCredentials;

    fn schema() -> LibrariumSchema {
        let catalog = Arc::new(MemoryCatalog::new());
        build_schema(
            catalog.clone(),
            catalog,
            Arc::new(TokenCodec::new("test-secret", chrono::Duration::minutes(60))),
            Arc::new(SharedSecretCredentials::new("secret")),
        )
    }

    #[test]
    fn sdl_exposes_the_published_contract() {
        let sdl = schema().sdl();
        assert!(sdl.contains("bookCount: Int!"), "missing bookCount:\n{}", sdl);
        assert!(sdl.contains("authorCount: Int!"));
        assert!(sdl.contains("allBooks(author: String, genre: String): [Book!]!"));
        assert!(sdl.contains("allAuthors: [Author!]!"));
        assert!(sdl.contains("me: User"));
        assert!(sdl.contains("born: Int"));
        assert!(sdl.contains("favoriteGenre: String!"));
        assert!(sdl.contains("genres: [String!]!"));
        assert!(sdl.contains("login(username: String!, password: String!): Token"));
        assert!(sdl.contains("addBook(title: String!, author: String!, published: Int!, genres: [String!]!): Book"));
        assert!(sdl.contains("editAuthor(name: String!, born: Int!): Author"));
        assert!(sdl.contains("createUser(username: String!, favoriteGenre: String!): User"));
    }
}
