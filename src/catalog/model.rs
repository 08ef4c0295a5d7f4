//! Catalog document types stored in the authors, books and users collections.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque unique identifier for catalog documents.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub born: Option<i32>,
}

impl Author {
    pub fn new(name: impl Into<String>, born: Option<i32>) -> Self {
        Self { id: new_id(), name: name.into(), born }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub published: i32,
    /// Genre tags in the order the client supplied them.
    pub genres: Vec<String>,
    /// Identity reference to the author record. Must resolve to an
    /// existing author before the book is persisted.
    pub author_id: String,
}

impl Book {
    pub fn new(title: impl Into<String>, published: i32, genres: Vec<String>, author_id: String) -> Self {
        Self { id: new_id(), title: title.into(), published, genres, author_id }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub favorite_genre: String,
}

impl User {
    pub fn new(username: impl Into<String>, favorite_genre: impl Into<String>) -> Self {
        Self { id: new_id(), username: username.into(), favorite_genre: favorite_genre.into() }
    }
}
