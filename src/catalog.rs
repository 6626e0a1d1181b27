// Catalog module: the book record and the in-memory collection. Every
// operation here is pure data manipulation; prompting and persistence live
// in `ui` and `session`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One catalog entry. Field names match the storage file keys.
///
/// Missing keys fall back to defaults so a hand-edited record with a field
/// dropped still loads.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Book {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub publication_year: String,
    #[serde(default)]
    pub read: bool,
}

impl Book {
    pub fn status_label(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "unread"
        }
    }

    /// Case-insensitive exact title comparison used by remove and update.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// Fields collected from the user when adding a book. Nothing is validated:
/// empty titles and non-numeric years are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_year: String,
    pub read: bool,
}

impl From<NewBook> for Book {
    fn from(fields: NewBook) -> Self {
        Book {
            title: fields.title,
            author: fields.author,
            genre: fields.genre,
            publication_year: fields.publication_year,
            read: fields.read,
        }
    }
}

/// Changes applied by `Catalog::update`. `None` keeps the existing text
/// value; `read` is always overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publication_year: Option<String>,
    pub read: bool,
}

impl BookPatch {
    /// Build a patch from raw prompt answers. An empty answer keeps the
    /// current value; anything else, including whitespace, replaces it.
    pub fn from_answers(
        title: String,
        author: String,
        genre: String,
        publication_year: String,
        read: bool,
    ) -> Self {
        fn keep_if_blank(answer: String) -> Option<String> {
            if answer.is_empty() {
                None
            } else {
                Some(answer)
            }
        }

        BookPatch {
            title: keep_if_blank(title),
            author: keep_if_blank(author),
            genre: keep_if_blank(genre),
            publication_year: keep_if_blank(publication_year),
            read,
        }
    }

    fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(genre) = self.genre {
            book.genre = genre;
        }
        if let Some(year) = self.publication_year {
            book.publication_year = year;
        }
        book.read = self.read;
    }
}

/// Ordered collection of books. Insertion order is display order; titles are
/// not required to be unique and title lookups take the first match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self { books: Vec::new() }
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Append a new record at the end of the catalog.
    pub fn add(&mut self, fields: NewBook) {
        self.books.push(fields.into());
    }

    /// First book whose title case-insensitively equals `title`.
    pub fn get_by_title(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.title_matches(title))
    }

    /// Remove the first book whose title matches. Returns the removed record,
    /// or `None` when nothing matched (the catalog is left untouched).
    pub fn remove(&mut self, title: &str) -> Option<Book> {
        let index = self.books.iter().position(|b| b.title_matches(title))?;
        Some(self.books.remove(index))
    }

    /// Books whose title or author contains `query`, case-insensitively, in
    /// catalog order. The caller's field choice is not consulted: both fields
    /// are always searched.
    pub fn find(&self, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.books
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.author.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Apply `patch` to the first book whose title matches. Returns the
    /// updated record, or `None` when nothing matched.
    pub fn update(&mut self, title: &str, patch: BookPatch) -> Option<&Book> {
        let book = self.books.iter_mut().find(|b| b.title_matches(title))?;
        patch.apply(book);
        Some(&*book)
    }

    /// Every book paired with its 1-based display index.
    pub fn list(&self) -> impl Iterator<Item = (usize, &Book)> {
        self.books.iter().enumerate().map(|(i, b)| (i + 1, b))
    }

    pub fn progress(&self) -> ReadingProgress {
        ReadingProgress {
            total: self.books.len(),
            read: self.books.iter().filter(|b| b.read).count(),
        }
    }
}

/// Read/total counts over the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingProgress {
    pub total: usize,
    pub read: usize,
}

impl ReadingProgress {
    /// Percentage of books marked read; 0 for an empty catalog.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.read as f64 / self.total as f64 * 100.0
    }
}

impl fmt::Display for ReadingProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percentage())
    }
}
