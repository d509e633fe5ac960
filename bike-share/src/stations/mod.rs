//! Bike-share station data.
//!
//! Decodes the city's open-data station feed, sorts it for display, and
//! keeps it alongside the suggestion index built from it so both can be
//! refreshed and queried from different tasks.

mod dataset;
mod directory;
mod error;
mod source;
mod station;

pub use dataset::parse_dataset;
pub use directory::{DirectoryEvent, RefreshOutcome, Selection, StationDirectory};
pub use error::StationError;
pub use source::{FileSource, StationSource};
pub use station::{BikeStation, Coordinate, sort_by_name};
