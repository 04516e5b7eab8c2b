//! Book record types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::books::error::BookError;

/// Fixed genre vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    SciFi,
    Novel,
    History,
    Manga,
    Romance,
    Professional,
}

impl Genre {
    /// All accepted genres, in vocabulary order.
    pub const ALL: [Genre; 6] = [
        Genre::SciFi,
        Genre::Novel,
        Genre::History,
        Genre::Manga,
        Genre::Romance,
        Genre::Professional,
    ];

    /// Wire name of the genre.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::SciFi => "SCI_FI",
            Genre::Novel => "NOVEL",
            Genre::History => "HISTORY",
            Genre::Manga => "MANGA",
            Genre::Romance => "ROMANCE",
            Genre::Professional => "PROFESSIONAL",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tags are matched exactly; `novel` is not `NOVEL`.
impl FromStr for Genre {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| BookError::UnknownGenre(s.to_string()))
    }
}

/// A stored book.
///
/// Field order is the serialized order: id, title, author, year, price, genres.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: i64,
    pub genres: Vec<Genre>,
}

/// Creation payload for a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: i64,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl Book {
    pub fn has_any_genre(&self, wanted: &[Genre]) -> bool {
        wanted.iter().any(|genre| self.genres.contains(genre))
    }
}
