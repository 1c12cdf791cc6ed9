//! # Song List Filters
//!
//! Composes the summary query for the list operation. A predicate clause is
//! added only for filters that are present, so the four shapes are:
//!
//! | title | performer | WHERE clause                        |
//! |-------|-----------|-------------------------------------|
//! | -     | -         | none                                |
//! | yes   | -         | `title GLOB ?`                      |
//! | -     | yes       | `performer GLOB ?`                  |
//! | yes   | yes       | `title GLOB ? AND performer GLOB ?` |
//!
//! SQLite only folds ASCII case in `LOWER()` and `LIKE`, so case folding is
//! done while building the pattern instead: every cased character of the
//! needle becomes a class of its Unicode case variants (`É` → `[Éé]`) and
//! the case-sensitive `GLOB` compares it against the stored text as is.
//!
//! Filter values are always bound, never spliced into the SQL text.

use sqlx::{QueryBuilder, Sqlite};

use super::model::SongQuery;

const SUMMARY_SELECT: &str = "SELECT id, title, performer FROM songs";

/// Columns that can be matched by substring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongField {
    Title,
    Performer,
}

impl SongField {
    pub fn column(&self) -> &'static str {
        match self {
            SongField::Title => "title",
            SongField::Performer => "performer",
        }
    }
}

/// Case-insensitive substring match on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainsFilter {
    pub field: SongField,
    pub needle: String,
}

impl ContainsFilter {
    pub fn new(field: SongField, needle: impl Into<String>) -> Self {
        Self {
            field,
            needle: needle.into(),
        }
    }

    /// GLOB pattern matching any value containing the needle in any casing
    pub fn pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.needle.len() * 4 + 2);
        pattern.push('*');
        for c in self.needle.chars() {
            push_glob_char(&mut pattern, c);
        }
        pattern.push('*');
        pattern
    }
}

/// Set of filters combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongFilter {
    pub filters: Vec<ContainsFilter>,
}

impl SongFilter {
    /// Build from list query parameters.
    ///
    /// An empty parameter (`?title=`) matches everything and is dropped.
    pub fn from_query(query: &SongQuery) -> Self {
        let mut filters = Vec::new();
        if let Some(title) = query.title.as_deref().filter(|t| !t.is_empty()) {
            filters.push(ContainsFilter::new(SongField::Title, title));
        }
        if let Some(performer) = query.performer.as_deref().filter(|p| !p.is_empty()) {
            filters.push(ContainsFilter::new(SongField::Performer, performer));
        }
        Self { filters }
    }

    /// Build the summary SELECT with one bound predicate per filter
    pub fn to_query(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(SUMMARY_SELECT);

        for (i, filter) in self.filters.iter().enumerate() {
            builder.push(if i == 0 { " WHERE " } else { " AND " });
            builder.push(filter.field.column());
            builder.push(" GLOB ");
            builder.push_bind(filter.pattern());
        }

        builder
    }
}

/// Append `c` to a GLOB pattern so it matches itself in any casing.
///
/// GLOB metacharacters are wrapped in a one-element class, which makes them
/// literal. Case mappings that expand to several characters (`ß` → `SS`)
/// are left out of the class.
fn push_glob_char(pattern: &mut String, c: char) {
    if matches!(c, '*' | '?' | '[') {
        pattern.push('[');
        pattern.push(c);
        pattern.push(']');
        return;
    }

    let mut variants = vec![c];
    for variant in [single_char(c.to_uppercase()), single_char(c.to_lowercase())]
        .into_iter()
        .flatten()
    {
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }

    if variants.len() == 1 {
        pattern.push(c);
    } else {
        pattern.push('[');
        pattern.extend(variants);
        pattern.push(']');
    }
}

fn single_char(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let first = chars.next()?;
    match chars.next() {
        None => Some(first),
        Some(_) => None,
    }
}
