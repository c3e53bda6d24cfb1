//! Timestamped CSV file sink for sensor records.
//!
//! Writes `output_<YYYYMMDD_HHMMSS>.csv` into the working directory with the
//! fixed header `assetId,sensorId,name,timestamp,value,unit`. The sink is
//! only ever invoked after the whole batch has been fetched; a failed run
//! never produces a partial file.

use std::path::{Path, PathBuf};
use time::format_description;
use time::OffsetDateTime;
use tracing::info;

use crate::format::CsvRecordProducer;
use crate::model::SensorRecord;

const FILE_NAME_TIMESTAMP: &str = "[year][month][day]_[hour][minute][second]";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("invalid timestamp format description: {0}")]
    TimestampFormatError(#[from] time::error::InvalidFormatDescription),
    #[error("failed to format timestamp: {0}")]
    TimestampError(#[from] time::error::Format),
}

/// Build the output file name for the given moment.
pub fn output_file_name(now: OffsetDateTime) -> Result<String, ExportError> {
    let format = format_description::parse(FILE_NAME_TIMESTAMP)?;
    Ok(format!("output_{}.csv", now.format(&format)?))
}

/// Write the records to a timestamped CSV file in `dir`, returning the path.
pub fn write_sensor_csv_to(
    dir: &Path,
    records: &[SensorRecord],
) -> Result<PathBuf, ExportError> {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let path = dir.join(output_file_name(now)?);

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(SensorRecord::csv_header())?;
    for record in records {
        for row in record.as_csv_records() {
            writer.write_record(&row)?;
        }
    }
    writer.flush()?;

    info!("Output file written to: {}", path.display());
    Ok(path)
}

/// Write the records to a timestamped CSV file in the working directory.
pub fn write_sensor_csv(records: &[SensorRecord]) -> Result<PathBuf, ExportError> {
    write_sensor_csv_to(Path::new("."), records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn records() -> Vec<SensorRecord> {
        vec![
            SensorRecord {
                asset_id: "1".to_string(),
                sensor_id: "s1".to_string(),
                name: "Temp".to_string(),
                timestamp: "2024-01-01T00:00:00Z".to_string(),
                value: "72.5".to_string(),
                unit: "F".to_string(),
            },
            SensorRecord {
                asset_id: "2".to_string(),
                sensor_id: "s9".to_string(),
                name: "State".to_string(),
                timestamp: String::new(),
                value: "Running".to_string(),
                unit: String::new(),
            },
        ]
    }

    #[test]
    fn file_name_follows_timestamp_pattern() {
        let name = output_file_name(datetime!(2024-01-02 03:04:05 UTC)).unwrap();
        assert_eq!(name, "output_20240102_030405.csv");
    }

    #[test]
    fn written_file_round_trips_through_csv_reader() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_sensor_csv_to(dir.path(), &records()).unwrap();
        assert!(path.exists());

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            header,
            vec!["assetId", "sensorId", "name", "timestamp", "value", "unit"]
        );

        let rows: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(|s| s.to_string()).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["1", "s1", "Temp", "2024-01-01T00:00:00Z", "72.5", "F"],
                vec!["2", "s9", "State", "", "Running", ""],
            ]
        );
    }

    #[test]
    fn empty_batch_still_writes_the_header() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_sensor_csv_to(dir.path(), &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "assetId,sensorId,name,timestamp,value,unit\n");
    }
}
