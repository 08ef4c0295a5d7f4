//! First-run demo catalog.
//!
//! When the store holds no authors and no books at startup, insert a small
//! classic-literature dataset so a fresh install has something to query.

use super::model::{Author, Book};
use super::store::CatalogStore;
use crate::error::AppResult;

const DEMO_AUTHORS: &[(&str, Option<i32>)] = &[
    ("Robert Martin", Some(1952)),
    ("Martin Fowler", Some(1963)),
    ("Fyodor Dostoevsky", Some(1821)),
    ("Joshua Kerievsky", None),
    ("Sandi Metz", None),
];

const DEMO_BOOKS: &[(&str, i32, &str, &[&str])] = &[
    ("Clean Code", 2008, "Robert Martin", &["refactoring"]),
    ("Agile software development", 2002, "Robert Martin", &["agile", "patterns", "design"]),
    ("Refactoring, edition 2", 2018, "Martin Fowler", &["refactoring"]),
    ("Refactoring to patterns", 2008, "Joshua Kerievsky", &["refactoring", "patterns"]),
    (
        "Practical Object-Oriented Design, An Agile Primer Using Ruby",
        2012,
        "Sandi Metz",
        &["refactoring", "design"],
    ),
    ("Crime and punishment", 1866, "Fyodor Dostoevsky", &["classic", "crime"]),
    ("The Demon", 1872, "Fyodor Dostoevsky", &["classic", "revolution"]),
];

/// Seed the demo catalog when the store is empty. Returns true when
/// seeding happened, false when existing data was left untouched.
pub async fn seed_if_empty(store: &dyn CatalogStore) -> AppResult<bool> {
    if store.author_count().await? > 0 || store.book_count().await? > 0 {
        return Ok(false);
    }
    tracing::info!(target: "startup", "Empty startup detected, seeding demo catalog");

    let mut authors = Vec::with_capacity(DEMO_AUTHORS.len());
    for (name, born) in DEMO_AUTHORS {
        let author = Author::new(*name, *born);
        store.insert_author(&author).await?;
        authors.push(author);
    }
    for (title, published, author_name, genres) in DEMO_BOOKS {
        let author = authors
            .iter()
            .find(|a| a.name == *author_name)
            .expect("demo book references a demo author");
        let genres = genres.iter().map(|g| g.to_string()).collect();
        store.insert_book(&Book::new(*title, *published, genres, author.id.clone())).await?;
    }
    tracing::info!(
        target: "startup",
        "Seeded {} authors and {} books",
        DEMO_AUTHORS.len(),
        DEMO_BOOKS.len()
    );
    Ok(true)
}
