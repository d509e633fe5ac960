//! Bike-share station browser.
//!
//! Loads the city's bike-share station feed and answers "which stations
//! start with what I've typed so far?", mapping a picked suggestion back
//! to its station.

pub mod settings;
pub mod stations;
pub mod suggest;
