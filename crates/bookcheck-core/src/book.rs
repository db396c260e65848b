//! Book records and the identifiers the Library API assigns to them

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Identifier assigned by the Library API on creation.
///
/// The service derives it as `isbn + aisle`, which for a [`BookInput`] is
/// `code + category`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Create a new identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One synthetic book, consumed by a single create invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInput {
    /// Author name
    pub author: String,
    /// Genre-like category, sent as `aisle`
    pub category: String,
    /// Book title, sent as `name`
    pub title: String,
    /// Unique 8-digit code, sent as `isbn`
    pub code: String,
}

impl BookInput {
    /// Create a new book input
    #[must_use]
    pub fn new(
        author: impl Into<String>,
        category: impl Into<String>,
        title: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            category: category.into(),
            title: title.into(),
            code: code.into(),
        }
    }

    /// The identifier the service is contracted to assign to this book
    #[must_use]
    pub fn expected_identifier(&self) -> Identifier {
        Identifier(format!("{}{}", self.code, self.category))
    }

    /// Addbook request body: `{isbn, aisle, name, author}`
    #[must_use]
    pub fn wire_payload(&self) -> Value {
        json!({
            "isbn": self.code,
            "aisle": self.category,
            "name": self.title,
            "author": self.author,
        })
    }
}
