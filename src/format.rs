//! Output formatting for console tables, CSV, and JSON.

use csv::Writer;
use serde::Serialize;
use std::str::FromStr;
use strum::EnumIter;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::model::{Asset, BusinessEntity, SensorRecord};

pub const TABLE: &str = "table";
pub const CSV: &str = "csv";
pub const JSON: &str = "json";

/// Error types that can occur during formatting operations
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    #[error("invalid output format {0}")]
    UnsupportedOutputFormat(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("CSV writer error: {0}")]
    CsvIntoInnerError(#[from] csv::IntoInnerError<Writer<Vec<u8>>>),
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
    #[error("JSON serialization error: {0}")]
    JsonSerializationError(#[from] serde_json::Error),
}

/// Supported console output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum OutputFormat {
    /// Human-readable console table
    Table,
    /// Comma-separated values with a header row
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    pub fn names() -> Vec<&'static str> {
        vec![TABLE, CSV, JSON]
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Table
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FormattingError;

    fn from_str(format_str: &str) -> Result<OutputFormat, FormattingError> {
        match format_str.to_lowercase().as_str() {
            TABLE => Ok(OutputFormat::Table),
            CSV => Ok(OutputFormat::Csv),
            JSON => Ok(OutputFormat::Json),
            other => Err(FormattingError::UnsupportedOutputFormat(other.to_string())),
        }
    }
}

/// Trait for producing CSV records from data
pub trait CsvRecordProducer {
    /// Returns the header row for the CSV output
    fn csv_header() -> Vec<String>;

    /// Converts the data into CSV records
    fn as_csv_records(&self) -> Vec<Vec<String>>;
}

/// Produce CSV output for a sequence of items, optionally with a header row.
pub fn to_csv<T: CsvRecordProducer>(
    items: &[T],
    with_header: bool,
) -> Result<String, FormattingError> {
    let mut wtr = Writer::from_writer(Vec::new());
    if with_header {
        wtr.write_record(T::csv_header())?;
    }
    for item in items {
        for record in item.as_csv_records() {
            wtr.write_record(&record)?;
        }
    }
    let bytes = wtr.into_inner()?;
    Ok(String::from_utf8(bytes)?)
}

/// Serialize a value as pretty-printed JSON.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FormattingError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Render the asset list as a console table.
pub fn asset_table(assets: &[Asset]) -> String {
    if assets.is_empty() {
        return "No assets found.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Asset Name", "Parent Name"]);
    for asset in assets {
        builder.push_record([
            asset.id.as_str(),
            asset.name.as_str(),
            asset.parent_name.as_deref().unwrap_or(""),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    format!("Asset List\n{}\n", table)
}

/// Render the business entity list as a console table.
pub fn entity_table(entities: &[BusinessEntity]) -> String {
    if entities.is_empty() {
        return "No business entities found.\n".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Parent Name"]);
    for entity in entities {
        builder.push_record([
            entity.id.as_str(),
            entity.name.as_str(),
            entity.parent_name.as_deref().unwrap_or(""),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    format!("Business Entity List\n{}\n", table)
}

/// Render sensor records as a console table with the given title.
pub fn sensor_table_with_title(title: &str, records: &[SensorRecord]) -> String {
    if records.is_empty() {
        return format!("{}\nNo sensors found.\n", title);
    }

    let mut builder = Builder::default();
    builder.push_record(["Asset ID", "Sensor ID", "Name", "Timestamp", "Value", "Unit"]);
    for record in records {
        builder.push_record([
            record.asset_id.as_str(),
            record.sensor_id.as_str(),
            record.name.as_str(),
            record.timestamp.as_str(),
            record.value.as_str(),
            record.unit.as_str(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());

    format!("{}\n{}\n", title, table)
}

/// Render sensor records as a console table.
pub fn sensor_table(records: &[SensorRecord]) -> String {
    sensor_table_with_title("Sensors", records)
}
