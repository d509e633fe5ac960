//! Suggestion index error types.

/// Errors from resolving a selection in the filtered view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuggestionError {
    /// Display index does not address a row of the filtered view
    #[error("display index {index} out of range (filtered view has {len} entries)")]
    OutOfRange { index: usize, len: usize },

    /// Filtered view refers to an entry missing from the full list
    #[error("filtered entry at display index {index} has no position in the full list")]
    Invariant { index: usize },
}
