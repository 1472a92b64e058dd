//! Survey spreadsheet import
//!
//! Reads a delimited export of the beacon survey sheet. Columns, in order:
//! `id, name, mac, longitude, latitude, floor`. Rows whose id cell is not
//! numeric are skipped, which covers the header row.

use crate::catalog::CatalogError;
use crate::core::{CatalogBeacon, GeoPoint};

const NAME_INDEX: usize = 1;
const MAC_INDEX: usize = 2;
const LONGITUDE_INDEX: usize = 3;
const LATITUDE_INDEX: usize = 4;
const FLOOR_INDEX: usize = 5;

/// Reader for delimited survey sheet exports
#[derive(Debug, Clone)]
pub struct SheetReader {
    /// Cell delimiter, comma by default
    pub delimiter: char,
}

impl Default for SheetReader {
    fn default() -> Self {
        Self { delimiter: ',' }
    }
}

impl SheetReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Parse sheet text into catalog records.
    ///
    /// Blank lines and rows without a numeric id cell are skipped; any
    /// other malformed row aborts the import.
    pub fn parse(&self, text: &str) -> Result<Vec<CatalogBeacon>, CatalogError> {
        let mut beacons = Vec::new();

        for (row, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let cells: Vec<&str> = line.split(self.delimiter).map(str::trim).collect();

            // Header and annotation rows carry text in the id column
            let device_id = match cells[0].parse::<u32>() {
                Ok(id) => id,
                Err(_) => continue,
            };

            let name = self.cell(&cells, row, NAME_INDEX, "name")?;
            let mac = self.cell(&cells, row, MAC_INDEX, "mac")?;
            let longitude = self.numeric_cell(&cells, row, LONGITUDE_INDEX, "longitude")?;
            let latitude = self.numeric_cell(&cells, row, LATITUDE_INDEX, "latitude")?;
            let floor = self.numeric_cell(&cells, row, FLOOR_INDEX, "floor")? as i32;

            let mut beacon = CatalogBeacon::new(mac, GeoPoint::new(longitude, latitude), floor)
                .with_device_id(device_id);
            if !name.is_empty() {
                beacon = beacon.with_name(name);
            }
            beacons.push(beacon);
        }
        Ok(beacons)
    }

    fn cell<'a>(
        &self,
        cells: &[&'a str],
        row: usize,
        index: usize,
        field: &'static str,
    ) -> Result<&'a str, CatalogError> {
        cells
            .get(index)
            .copied()
            .ok_or(CatalogError::MissingField { row, field })
    }

    fn numeric_cell(
        &self,
        cells: &[&str],
        row: usize,
        index: usize,
        field: &'static str,
    ) -> Result<f64, CatalogError> {
        let raw = self.cell(cells, row, index, field)?;
        raw.parse::<f64>().map_err(|_| CatalogError::InvalidNumber {
            row,
            field,
            value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
device_id,device_name,mac_address,longitude,latitude,floor
1,Entrance A,f0:9f:c2:00:00:01,4.4777,51.0224,1
2,Stairwell,f0:9f:c2:00:00:02,4.4790,51.0230,2
";

    #[test]
    fn parses_rows_and_skips_header() {
        let beacons = SheetReader::new().parse(SHEET).unwrap();
        assert_eq!(beacons.len(), 2);
        assert_eq!(beacons[0].device_id, Some(1));
        assert_eq!(beacons[0].name.as_deref(), Some("Entrance A"));
        assert_eq!(beacons[0].mac, "f0:9f:c2:00:00:01");
        assert_eq!(beacons[1].floor, 2);
    }

    #[test]
    fn skips_blank_lines() {
        let text = "\n1,Lobby,f0:9f:c2:00:00:01,4.4777,51.0224,1\n\n";
        let beacons = SheetReader::new().parse(text).unwrap();
        assert_eq!(beacons.len(), 1);
    }

    #[test]
    fn supports_alternate_delimiters() {
        let text = "3\tAtrium\tf0:9f:c2:00:00:03\t4.4800\t51.0240\t3";
        let beacons = SheetReader::with_delimiter('\t').parse(text).unwrap();
        assert_eq!(beacons[0].name.as_deref(), Some("Atrium"));
        assert_eq!(beacons[0].floor, 3);
    }

    #[test]
    fn short_row_reports_the_missing_field() {
        let text = "1,Lobby,f0:9f:c2:00:00:01,4.4777";
        assert_eq!(
            SheetReader::new().parse(text).unwrap_err(),
            CatalogError::MissingField {
                row: 0,
                field: "latitude"
            }
        );
    }

    #[test]
    fn bad_coordinate_reports_row_and_value() {
        let text = "1,Lobby,f0:9f:c2:00:00:01,east,51.0224,1";
        assert_eq!(
            SheetReader::new().parse(text).unwrap_err(),
            CatalogError::InvalidNumber {
                row: 0,
                field: "longitude",
                value: "east".to_string()
            }
        );
    }
}
