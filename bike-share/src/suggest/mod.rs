//! Station name suggestions.
//!
//! Holds the searchable entries shown under the search box and narrows them
//! down with a case-insensitive prefix filter as the user types.

mod entry;
mod error;
mod index;

pub use entry::Entry;
pub use error::SuggestionError;
pub use index::SuggestionIndex;
