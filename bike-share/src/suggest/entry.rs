//! Searchable suggestion entries.

use std::fmt;

/// Separator between the parts of a station feature name.
const NAME_SEPARATOR: &str = " - ";

/// A single searchable row: the text matched against the filter, plus a
/// secondary hint shown alongside it.
///
/// # Examples
///
/// ```
/// use bike_share::suggest::Entry;
///
/// let entry = Entry::from_feature_name("ACCA - Sturt St - Southbank");
/// assert_eq!(entry.text(), "ACCA");
/// assert_eq!(entry.hint(), "Sturt St, Southbank");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entry {
    text: String,
    hint: String,
}

impl Entry {
    /// Create an entry from its display text and hint.
    pub fn new(text: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            hint: hint.into(),
        }
    }

    /// Build the entry for a station from its feature name.
    ///
    /// Feature names look like `"Title - Street - Suburb"` or
    /// `"Street - Suburb"`. Three parts give the title as text and
    /// `"Street, Suburb"` as hint; two parts give the street as text and
    /// `"Street, Suburb"` as hint. Anything else is used whole, with no hint.
    pub fn from_feature_name(name: &str) -> Self {
        let parts: Vec<&str> = name.split(NAME_SEPARATOR).collect();

        match parts.as_slice() {
            [title, street, suburb] => Self::new(*title, format!("{street}, {suburb}")),
            [street, suburb] => Self::new(*street, format!("{street}, {suburb}")),
            _ => Self::new(name, ""),
        }
    }

    /// The display text, which is what the prefix filter matches.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The secondary annotation. Never matched.
    pub fn hint(&self) -> &str {
        &self.hint
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hint.is_empty() {
            f.write_str(&self.text)
        } else {
            write!(f, "{} ({})", self.text, self.hint)
        }
    }
}
