//! Content collection naming.

use std::fmt;

/// Static overrides from human-readable table name to document-store key.
/// Names not listed here fall back to lower-case with underscores.
const STORAGE_KEY_OVERRIDES: &[(&str, &str)] = &[("Conteudo Educativo", "educational_texts")];

/// A record collection, addressed by its human-readable table name.
///
/// The spreadsheet store uses the table name verbatim; the document store
/// uses the derived storage key.
///
/// # Example
///
/// ```
/// use biostart_core::Collection;
///
/// assert_eq!(Collection::EDUCATIONAL_TEXTS.table_name(), "Conteudo Educativo");
/// assert_eq!(Collection::EDUCATIONAL_TEXTS.storage_key(), "educational_texts");
/// assert_eq!(Collection::QUIZZES.storage_key(), "quizzes");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection(&'static str);

impl Collection {
    /// Educational text content.
    pub const EDUCATIONAL_TEXTS: Collection = Collection("Conteudo Educativo");
    /// Quiz content.
    pub const QUIZZES: Collection = Collection("Quizzes");
    /// Checklist content.
    pub const CHECKLISTS: Collection = Collection("Checklists");
    /// Learner accounts (spreadsheet store only).
    pub const USERS: Collection = Collection("Utilizadores");
    /// Administrator accounts (spreadsheet store only).
    pub const ADMINS: Collection = Collection("Administradores");

    /// Create a collection from a table name.
    pub const fn new(table_name: &'static str) -> Self {
        Self(table_name)
    }

    /// The human-readable table name, as used by the spreadsheet store.
    pub fn table_name(&self) -> &str {
        self.0
    }

    /// The storage key used by the document store.
    pub fn storage_key(&self) -> String {
        for (name, key) in STORAGE_KEY_OVERRIDES {
            if *name == self.0 {
                return (*key).to_string();
            }
        }
        self.0.to_lowercase().replace(' ', "_")
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
