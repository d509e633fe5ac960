//! Producers of station data.

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::dataset::parse_dataset;
use super::error::StationError;
use super::station::BikeStation;

/// Something that can produce the current list of stations.
///
/// Implementations return stations in feed order; sorting for display is
/// done by the consumer.
pub trait StationSource {
    /// Fetch all stations.
    fn fetch(&self) -> impl Future<Output = Result<Vec<BikeStation>, StationError>> + Send;
}

/// Station source backed by a downloaded copy of the open-data feed.
///
/// The file is re-read on every fetch, so replacing it on disk is picked up
/// by the next refresh.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading the feed document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the feed document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StationSource for FileSource {
    async fn fetch(&self) -> Result<Vec<BikeStation>, StationError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| StationError::Io {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "read station dataset");

        parse_dataset(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn load_sample_dataset() {
        let source = FileSource::new("data/sample_rows.json");
        let stations = source.fetch().await.unwrap();

        assert_eq!(stations.len(), 5);
        assert_eq!(stations[0].feature_name, "Fitzroy Town Hall - Moor St - Fitzroy");
        assert_eq!(stations[0].bikes, 4);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let source = FileSource::new("/nonexistent/path/rows.json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, StationError::Io { .. }));
    }

    #[tokio::test]
    async fn rereads_file_on_each_fetch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.json");
        let source = FileSource::new(&path);

        std::fs::write(&path, r#"{"data": []}"#).unwrap();
        assert!(source.fetch().await.unwrap().is_empty());

        std::fs::copy("data/sample_rows.json", &path).unwrap();
        assert_eq!(source.fetch().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn garbage_file_is_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rows.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileSource::new(&path).fetch().await.unwrap_err();
        assert!(matches!(err, StationError::Json { .. }));
    }
}
