//! Shared station list and suggestion index.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, RwLock, mpsc};
use tracing::{debug, info, warn};

use crate::suggest::{Entry, SuggestionError, SuggestionIndex};

use super::error::StationError;
use super::source::StationSource;
use super::station::{BikeStation, sort_by_name};

/// Result of asking for a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Stations were replaced; carries the new station count.
    Refreshed(usize),
    /// Another refresh was already running, so nothing was fetched.
    InProgress,
}

/// Notification sent to the registered listener after each refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryEvent {
    Refreshed { count: usize },
    Failed { message: String },
}

/// A station picked from the suggestion list.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Position of the station in the full, sorted list.
    pub index: usize,
    pub entry: Entry,
    pub station: BikeStation,
}

#[derive(Debug, Default)]
struct DirectoryState {
    /// Sorted by name; `suggestions.entries()[i]` describes `stations[i]`.
    stations: Vec<BikeStation>,
    suggestions: SuggestionIndex,
}

impl DirectoryState {
    fn selection(&self, display_index: usize) -> Result<Selection, SuggestionError> {
        let index = self.suggestions.resolve_selection(display_index)?;

        let missing = SuggestionError::Invariant {
            index: display_index,
        };
        let station = self.stations.get(index).ok_or(missing.clone())?;
        let entry = self.suggestions.entries().get(index).ok_or(missing)?;

        Ok(Selection {
            index,
            entry: entry.clone(),
            station: station.clone(),
        })
    }
}

/// Thread-safe station list with its suggestion index.
///
/// Refreshes (typically from a background task) and filter updates (from the
/// input loop) are serialized through one lock, so the suggestion index
/// always describes the station list it sits next to.
pub struct StationDirectory<S> {
    inner: Arc<RwLock<DirectoryState>>,
    source: Arc<S>,
    refreshing: Arc<AtomicBool>,
    listener: Arc<Mutex<Option<mpsc::UnboundedSender<DirectoryEvent>>>>,
}

impl<S> Clone for StationDirectory<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            source: Arc::clone(&self.source),
            refreshing: Arc::clone(&self.refreshing),
            listener: Arc::clone(&self.listener),
        }
    }
}

impl<S: StationSource> StationDirectory<S> {
    /// Create an empty directory. Nothing is fetched until [`refresh`](Self::refresh).
    pub fn empty(source: S) -> Self {
        Self {
            inner: Arc::new(RwLock::new(DirectoryState::default())),
            source: Arc::new(source),
            refreshing: Arc::new(AtomicBool::new(false)),
            listener: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a directory by fetching from the source.
    ///
    /// This will fail if the source is unavailable.
    pub async fn load(source: S) -> Result<Self, StationError> {
        let directory = Self::empty(source);
        let stations = directory.source.fetch().await?;
        directory.replace(stations).await;
        Ok(directory)
    }

    /// Refresh the stations from the source.
    ///
    /// Only one refresh runs at a time; a call made while another is in
    /// flight returns [`RefreshOutcome::InProgress`] immediately. On failure
    /// the existing stations are kept and the error is returned.
    ///
    /// A successful refresh resets the suggestion list to every station. The
    /// stored filter is kept but not re-applied.
    pub async fn refresh(&self) -> Result<RefreshOutcome, StationError> {
        let Some(_guard) = RefreshGuard::acquire(&self.refreshing) else {
            debug!("station refresh already in progress");
            return Ok(RefreshOutcome::InProgress);
        };

        match self.source.fetch().await {
            Ok(stations) => {
                let count = self.replace(stations).await;
                info!(count, "refreshed bike stations");
                self.notify(DirectoryEvent::Refreshed { count }).await;
                Ok(RefreshOutcome::Refreshed(count))
            }
            Err(e) => {
                warn!(error = %e, "failed to refresh bike stations");
                self.notify(DirectoryEvent::Failed {
                    message: e.to_string(),
                })
                .await;
                Err(e)
            }
        }
    }

    /// Register the listener for refresh events, replacing any previous one.
    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<DirectoryEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        *self.listener.lock().await = Some(tx);
        rx
    }

    /// Narrow the suggestion list to stations whose title starts with `prefix`.
    pub async fn set_filter(&self, prefix: &str) {
        let mut guard = self.inner.write().await;
        guard.suggestions.set_filter(prefix);
    }

    /// The current filter.
    pub async fn filter(&self) -> String {
        let guard = self.inner.read().await;
        guard.suggestions.filter().to_string()
    }

    /// Suggestions matching the current filter, in display order.
    pub async fn suggestions(&self) -> Vec<Entry> {
        let guard = self.inner.read().await;
        guard.suggestions.filtered_entries().cloned().collect()
    }

    /// Resolve a row of the suggestion list, as it currently stands, to its station.
    ///
    /// After a refresh the list shows every station until the filter is set
    /// again; use [`select_filtered`](Self::select_filtered) to resolve
    /// against the filtered list instead.
    pub async fn select(&self, display_index: usize) -> Result<Selection, SuggestionError> {
        let guard = self.inner.read().await;
        guard.selection(display_index)
    }

    /// Re-apply the stored filter, then resolve `display_index` against it.
    ///
    /// Both steps happen under one lock, so a refresh landing in between
    /// cannot shift the rows the user picked from.
    pub async fn select_filtered(
        &self,
        display_index: usize,
    ) -> Result<Selection, SuggestionError> {
        let mut guard = self.inner.write().await;
        let filter = guard.suggestions.filter().to_string();
        guard.suggestions.set_filter(filter);
        guard.selection(display_index)
    }

    /// All stations, sorted by name.
    pub async fn stations(&self) -> Vec<BikeStation> {
        let guard = self.inner.read().await;
        guard.stations.clone()
    }

    /// Get the number of stations.
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.stations.len()
    }

    /// Check if there are no stations.
    pub async fn is_empty(&self) -> bool {
        let guard = self.inner.read().await;
        guard.stations.is_empty()
    }

    async fn replace(&self, mut stations: Vec<BikeStation>) -> usize {
        sort_by_name(&mut stations);
        let entries: Vec<Entry> = stations.iter().map(BikeStation::entry).collect();
        let count = stations.len();

        let mut guard = self.inner.write().await;
        guard.suggestions.set_entries(entries);
        guard.stations = stations;

        count
    }

    async fn notify(&self, event: DirectoryEvent) {
        let mut listener = self.listener.lock().await;
        if let Some(tx) = listener.as_ref()
            && tx.send(event).is_err()
        {
            debug!("refresh listener dropped");
            *listener = None;
        }
    }
}

/// Marks a refresh as in flight until dropped, including when the refresh
/// future is cancelled.
struct RefreshGuard<'a>(&'a AtomicBool);

impl<'a> RefreshGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
