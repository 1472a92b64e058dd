//! Remote beacon feed parsing
//!
//! The feed is a JSON array of rows, one beacon per row:
//! `[mac, longitude, latitude, floor]`. Servers are inconsistent about
//! cell types, so numeric cells are accepted both as JSON numbers and as
//! numeric strings.

use crate::catalog::CatalogError;
use crate::core::{CatalogBeacon, GeoPoint};
use serde_json::Value;

const MAC_INDEX: usize = 0;
const LONGITUDE_INDEX: usize = 1;
const LATITUDE_INDEX: usize = 2;
const FLOOR_INDEX: usize = 3;

/// Parse an already-fetched feed body into catalog records.
///
/// Fails on the first malformed row; a partially applied catalog would be
/// worse than none at all.
pub fn parse_feed(body: &str) -> Result<Vec<CatalogBeacon>, CatalogError> {
    let json: Value =
        serde_json::from_str(body).map_err(|e| CatalogError::UnexpectedFeedShape {
            details: e.to_string(),
        })?;

    let rows = json
        .as_array()
        .ok_or_else(|| CatalogError::UnexpectedFeedShape {
            details: "top-level value is not an array".to_string(),
        })?;

    let mut beacons = Vec::with_capacity(rows.len());
    for (row, value) in rows.iter().enumerate() {
        let cells = value
            .as_array()
            .ok_or_else(|| CatalogError::UnexpectedFeedShape {
                details: format!("row {} is not an array", row),
            })?;

        let mac = string_cell(cells, row, MAC_INDEX, "mac")?;
        let longitude = numeric_cell(cells, row, LONGITUDE_INDEX, "longitude")?;
        let latitude = numeric_cell(cells, row, LATITUDE_INDEX, "latitude")?;
        let floor = numeric_cell(cells, row, FLOOR_INDEX, "floor")? as i32;

        beacons.push(CatalogBeacon::new(
            mac,
            GeoPoint::new(longitude, latitude),
            floor,
        ));
    }
    Ok(beacons)
}

fn string_cell(
    cells: &[Value],
    row: usize,
    index: usize,
    field: &'static str,
) -> Result<String, CatalogError> {
    let cell = cells
        .get(index)
        .ok_or(CatalogError::MissingField { row, field })?;
    match cell {
        Value::String(s) => Ok(s.clone()),
        other => Ok(other.to_string()),
    }
}

fn numeric_cell(
    cells: &[Value],
    row: usize,
    index: usize,
    field: &'static str,
) -> Result<f64, CatalogError> {
    let cell = cells
        .get(index)
        .ok_or(CatalogError::MissingField { row, field })?;
    let parsed = match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| CatalogError::InvalidNumber {
        row,
        field,
        value: cell.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_cells() {
        let body = r#"[["f0:9f:c2:00:00:01", 4.4777, 51.0224, 2]]"#;
        let beacons = parse_feed(body).unwrap();
        assert_eq!(beacons.len(), 1);
        assert_eq!(beacons[0].mac, "f0:9f:c2:00:00:01");
        assert_eq!(beacons[0].location.longitude, 4.4777);
        assert_eq!(beacons[0].location.latitude, 51.0224);
        assert_eq!(beacons[0].floor, 2);
    }

    #[test]
    fn parses_stringified_cells() {
        let body = r#"[["f0:9f:c2:00:00:02", "4.4790", "51.0230", "3"]]"#;
        let beacons = parse_feed(body).unwrap();
        assert_eq!(beacons[0].location.longitude, 4.479);
        assert_eq!(beacons[0].floor, 3);
    }

    #[test]
    fn rejects_non_array_body() {
        let err = parse_feed(r#"{"beacons": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::UnexpectedFeedShape { .. }));
    }

    #[test]
    fn rejects_short_row_with_position() {
        let body = r#"[["f0:9f:c2:00:00:01", 4.4777, 51.0224, 2], ["f0:9f:c2:00:00:03", 4.5]]"#;
        assert_eq!(
            parse_feed(body).unwrap_err(),
            CatalogError::MissingField {
                row: 1,
                field: "latitude"
            }
        );
    }

    #[test]
    fn rejects_non_numeric_coordinate() {
        let body = r#"[["f0:9f:c2:00:00:01", "east-ish", 51.0224, 2]]"#;
        assert_eq!(
            parse_feed(body).unwrap_err(),
            CatalogError::InvalidNumber {
                row: 0,
                field: "longitude",
                value: "\"east-ish\"".to_string()
            }
        );
    }

    #[test]
    fn empty_feed_yields_empty_catalog() {
        assert!(parse_feed("[]").unwrap().is_empty());
    }
}
