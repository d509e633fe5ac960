//! Bike station records.

use crate::suggest::Entry;

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A docking station as reported by the open-data feed.
#[derive(Debug, Clone, PartialEq)]
pub struct BikeStation {
    /// Full name, e.g. `"Fitzroy Town Hall - Moor St - Fitzroy"`.
    pub feature_name: String,
    /// Bikes currently available to hire.
    pub bikes: u32,
    pub coordinate: Coordinate,
}

impl BikeStation {
    /// The suggestion row shown for this station.
    pub fn entry(&self) -> Entry {
        Entry::from_feature_name(&self.feature_name)
    }
}

/// Sort stations by feature name, ignoring case.
///
/// The sort is stable, so names differing only in case keep their feed order.
pub fn sort_by_name(stations: &mut [BikeStation]) {
    stations.sort_by_cached_key(|s| s.feature_name.to_lowercase());
}
