//! Prefix-filtered suggestion index.

use super::entry::Entry;
use super::error::SuggestionError;

/// Ordered suggestion entries with a case-insensitive prefix filter.
///
/// The filtered view is derived state: it is recomputed whenever the entries
/// or the filter change. It is stored as positions into the full list, so a
/// row picked from the filtered view always maps back to the exact entry it
/// came from, even when the list holds duplicate entries.
///
/// Access is single-writer: callers sharing an index across tasks must
/// serialize access themselves (see [`crate::stations::StationDirectory`]).
///
/// # Examples
///
/// ```
/// use bike_share::suggest::{Entry, SuggestionIndex};
///
/// let mut index = SuggestionIndex::new();
/// index.set_entries(vec![
///     Entry::new("Cleve Gardens", ""),
///     Entry::new("Coventry St / Clarendon St", ""),
///     Entry::new("Domain Interchange", ""),
/// ]);
///
/// index.set_filter("co");
/// let texts: Vec<&str> = index.filtered_entries().map(Entry::text).collect();
/// assert_eq!(texts, ["Coventry St / Clarendon St"]);
/// assert_eq!(index.resolve_selection(0), Ok(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SuggestionIndex {
    entries: Vec<Entry>,
    /// Lowercased `entries[i].text`, kept alongside to avoid re-folding per keystroke.
    keys: Vec<String>,
    filter: String,
    /// Positions into `entries`, ascending.
    filtered: Vec<usize>,
}

impl SuggestionIndex {
    /// Create an empty index with an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entries.
    ///
    /// The filtered view is reset to the full new list. The stored filter
    /// is kept but not re-applied; call [`set_filter`](Self::set_filter)
    /// again to narrow the new entries.
    pub fn set_entries(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.entries = entries.into_iter().collect();
        self.keys = self.entries.iter().map(|e| e.text().to_lowercase()).collect();
        self.filtered = (0..self.entries.len()).collect();
    }

    /// Set the prefix filter and recompute the filtered view.
    ///
    /// An empty prefix shows every entry. Otherwise an entry is shown when
    /// its lowercased text starts with the lowercased prefix. No trimming or
    /// other normalization is applied.
    pub fn set_filter(&mut self, prefix: impl Into<String>) {
        self.filter = prefix.into();

        if self.filter.is_empty() {
            self.filtered = (0..self.entries.len()).collect();
            return;
        }

        let prefix = self.filter.to_lowercase();
        self.filtered = self
            .keys
            .iter()
            .enumerate()
            .filter(|(_, key)| key.starts_with(&prefix))
            .map(|(i, _)| i)
            .collect();
    }

    /// The last filter passed to [`set_filter`](Self::set_filter).
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// All entries, in the order they were supplied.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries matching the current filter, in their original order.
    pub fn filtered_entries(&self) -> impl ExactSizeIterator<Item = &Entry> + '_ {
        self.filtered.iter().map(|&i| &self.entries[i])
    }

    /// Number of entries in the filtered view.
    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// Entry at `display_index` in the filtered view.
    pub fn filtered_entry(&self, display_index: usize) -> Option<&Entry> {
        self.filtered.get(display_index).map(|&i| &self.entries[i])
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Translate a row of the filtered view into a position in the full list.
    ///
    /// Consumers that keep per-entry data (markers, station records) index it
    /// against the full list, not the filtered one.
    pub fn resolve_selection(&self, display_index: usize) -> Result<usize, SuggestionError> {
        let position = *self
            .filtered
            .get(display_index)
            .ok_or(SuggestionError::OutOfRange {
                index: display_index,
                len: self.filtered.len(),
            })?;

        // Unfiltered: both views are the same sequence.
        if self.filtered.len() == self.entries.len() {
            return Ok(display_index);
        }

        if position < self.entries.len() {
            Ok(position)
        } else {
            Err(SuggestionError::Invariant {
                index: display_index,
            })
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Small alphabet so that random filters actually hit entries.
    fn entry() -> impl Strategy<Value = Entry> {
        ("[abcABC /]{0,6}", "[xy]{0,2}").prop_map(|(text, hint)| Entry::new(text, hint))
    }

    fn entries() -> impl Strategy<Value = Vec<Entry>> {
        proptest::collection::vec(entry(), 0..20)
    }

    fn matches(entry: &Entry, filter: &str) -> bool {
        entry
            .text()
            .to_lowercase()
            .starts_with(&filter.to_lowercase())
    }

    proptest! {
        /// Every shown entry matches, and every matching entry is shown in order
        #[test]
        fn filter_is_exact_ordered_subsequence(all in entries(), filter in "[abcABC ]{0,3}") {
            let mut index = SuggestionIndex::new();
            index.set_entries(all.clone());
            index.set_filter(filter.as_str());

            let shown: Vec<Entry> = index.filtered_entries().cloned().collect();
            let expected: Vec<Entry> = all.iter().filter(|e| matches(e, &filter)).cloned().collect();
            prop_assert_eq!(shown, expected);
        }

        /// Clearing the filter restores the full list regardless of prior state
        #[test]
        fn empty_filter_restores_everything(all in entries(), prior in "[abc]{0,3}") {
            let mut index = SuggestionIndex::new();
            index.set_entries(all.clone());
            index.set_filter(prior);
            index.set_filter("");

            let shown: Vec<Entry> = index.filtered_entries().cloned().collect();
            prop_assert_eq!(shown, all);
        }

        /// Resolved selections point at a value-equal entry in the full list
        #[test]
        fn resolve_round_trips(all in entries(), filter in "[abcABC]{0,2}") {
            let mut index = SuggestionIndex::new();
            index.set_entries(all.clone());
            index.set_filter(filter);

            for i in 0..index.filtered_len() {
                let position = index.resolve_selection(i).unwrap();
                prop_assert!(position < all.len());
                prop_assert_eq!(&all[position], index.filtered_entry(i).unwrap());
            }
        }

        /// Resolved positions are strictly increasing, so duplicates never collapse
        #[test]
        fn resolve_is_injective(all in entries(), filter in "[abc]{0,2}") {
            let mut index = SuggestionIndex::new();
            index.set_entries(all);
            index.set_filter(filter);

            let positions: Vec<usize> = (0..index.filtered_len())
                .map(|i| index.resolve_selection(i).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        /// Indices past the filtered view are rejected
        #[test]
        fn resolve_out_of_range_rejected(all in entries(), filter in "[abc]{0,2}", extra in 0usize..5) {
            let mut index = SuggestionIndex::new();
            index.set_entries(all);
            index.set_filter(filter);

            let len = index.filtered_len();
            prop_assert_eq!(
                index.resolve_selection(len + extra),
                Err(SuggestionError::OutOfRange { index: len + extra, len })
            );
        }
    }
}
