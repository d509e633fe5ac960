//! Decoder for the open-data station feed.
//!
//! The feed is a Socrata `rows.json` export: a JSON object whose `data`
//! member holds one positional array per station. Only a handful of
//! columns are read:
//!
//! | column | contents                                         |
//! |--------|--------------------------------------------------|
//! | 9      | feature name                                     |
//! | 11     | available bikes, as a decimal string             |
//! | 14     | location array; `[1]` latitude, `[2]` longitude  |

use serde::Deserialize;
use serde_json::Value;

use super::error::StationError;
use super::station::{BikeStation, Coordinate};

const NAME_COLUMN: usize = 9;
const BIKES_COLUMN: usize = 11;
const LOCATION_COLUMN: usize = 14;
const LATITUDE_FIELD: usize = 1;
const LONGITUDE_FIELD: usize = 2;

/// Top-level feed document. Metadata members are ignored.
#[derive(Debug, Deserialize)]
struct RowsDocument {
    data: Vec<Value>,
}

/// Decode every station row in a feed document, in feed order.
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<BikeStation>, StationError> {
    let document: RowsDocument =
        serde_json::from_slice(bytes).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;

    document
        .data
        .iter()
        .enumerate()
        .map(|(row, columns)| decode_row(row, columns))
        .collect()
}

fn decode_row(row: usize, columns: &Value) -> Result<BikeStation, StationError> {
    let malformed = |reason| StationError::Row { row, reason };
    let columns = columns
        .as_array()
        .ok_or_else(|| malformed("row is not an array"))?;

    let feature_name = columns
        .get(NAME_COLUMN)
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("missing feature name"))?;

    let bikes = columns
        .get(BIKES_COLUMN)
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| malformed("missing or invalid bike count"))?;

    let location = columns
        .get(LOCATION_COLUMN)
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing location"))?;

    let latitude = decimal_field(location, LATITUDE_FIELD)
        .ok_or_else(|| malformed("missing or invalid latitude"))?;
    let longitude = decimal_field(location, LONGITUDE_FIELD)
        .ok_or_else(|| malformed("missing or invalid longitude"))?;

    Ok(BikeStation {
        feature_name: feature_name.to_string(),
        bikes,
        coordinate: Coordinate {
            latitude,
            longitude,
        },
    })
}

fn decimal_field(location: &[Value], field: usize) -> Option<f64> {
    location
        .get(field)?
        .as_str()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
