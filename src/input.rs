//! Asset ID input file parsing.
//!
//! Sensor commands can take their asset list from a CSV file with a column
//! literally named `AssetId`. Values are returned in file order; other
//! columns are ignored.

use std::path::Path;
use thiserror::Error;
use tracing::debug;

pub const ASSET_ID_COLUMN: &str = "AssetId";

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input file: {0}")]
    CsvError(#[from] csv::Error),
    #[error("input file has no \"AssetId\" column")]
    MissingAssetIdColumn,
}

/// Read the `AssetId` column from a CSV file.
pub fn read_asset_ids(path: &Path) -> Result<Vec<String>, InputError> {
    let mut reader = csv::Reader::from_path(path)?;

    let column = reader
        .headers()?
        .iter()
        .position(|name| name == ASSET_ID_COLUMN)
        .ok_or(InputError::MissingAssetIdColumn)?;

    let mut asset_ids = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(column) {
            asset_ids.push(value.to_string());
        }
    }

    debug!("Read {} asset IDs from {}", asset_ids.len(), path.display());
    Ok(asset_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_asset_ids_in_file_order() {
        let file = write_file("AssetId,Comment\n42,main CRAC\n7,backup\n");

        let asset_ids = read_asset_ids(file.path()).unwrap();
        assert_eq!(asset_ids, vec!["42", "7"]);
    }

    #[test]
    fn column_position_does_not_matter() {
        let file = write_file("Site,AssetId\nDC-1,42\n");

        let asset_ids = read_asset_ids(file.path()).unwrap();
        assert_eq!(asset_ids, vec!["42"]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = write_file("Id,Name\n42,CRAC-1\n");

        assert!(matches!(
            read_asset_ids(file.path()),
            Err(InputError::MissingAssetIdColumn)
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = read_asset_ids(Path::new("does-not-exist.csv"));
        assert!(matches!(result, Err(InputError::CsvError(_))));
    }
}
