//! Wire and record types for assets, business entities, and sensors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::format::CsvRecordProducer;

/// An asset tracked by the monitoring instance (e.g. a cooling unit).
///
/// Fields beyond the ones named here are passed through untouched in
/// `extra`; the listing endpoint returns considerably more than we render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// An organizational grouping returned by the business entity endpoint.
/// Structurally parallel to [`Asset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessEntity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// A measurement stream attached to an asset.
///
/// The raw per-sensor payload does not carry the owning asset ID; `asset_id`
/// decodes as empty and is overwritten by the fetcher. `value` is loosely
/// typed on the wire: number, string, or null have all been observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub id: String,
    #[serde(default)]
    pub asset_id: String,
    pub name: String,
    #[serde(default)]
    pub last_value_update: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub unit_string: Option<String>,
}

impl Sensor {
    /// Flatten into the export record shape.
    pub fn to_record(&self) -> SensorRecord {
        SensorRecord {
            asset_id: self.asset_id.clone(),
            sensor_id: self.id.clone(),
            name: self.name.clone(),
            timestamp: self.last_value_update.clone().unwrap_or_default(),
            value: display_value(self.value.as_ref()),
            unit: self.unit_string.clone().unwrap_or_default(),
        }
    }
}

/// Render a loosely typed sensor value for display and export.
///
/// Strings render without surrounding quotes; numbers use their JSON
/// rendering; a missing or null value renders as an empty field.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Normalized, flattened sensor record consumed by the sinks.
///
/// The field order `assetId, sensorId, name, timestamp, value, unit` is part
/// of the output contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub asset_id: String,
    pub sensor_id: String,
    pub name: String,
    pub timestamp: String,
    pub value: String,
    pub unit: String,
}

/// Envelope of the asset listing endpoint: the payload sits under `data`,
/// with paging information under `_metadata`.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetListResponse {
    pub data: Vec<Asset>,
    #[serde(rename = "_metadata", default)]
    pub metadata: Option<Value>,
}

/// Envelope of the business entity listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BusinessEntityListResponse {
    pub data: Vec<BusinessEntity>,
    #[serde(rename = "_metadata", default)]
    pub metadata: Option<Value>,
}

impl CsvRecordProducer for SensorRecord {
    fn csv_header() -> Vec<String> {
        ["assetId", "sensorId", "name", "timestamp", "value", "unit"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.asset_id.clone(),
            self.sensor_id.clone(),
            self.name.clone(),
            self.timestamp.clone(),
            self.value.clone(),
            self.unit.clone(),
        ]]
    }
}

impl CsvRecordProducer for Asset {
    fn csv_header() -> Vec<String> {
        ["id", "name", "parentName"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.id.clone(),
            self.name.clone(),
            self.parent_name.clone().unwrap_or_default(),
        ]]
    }
}

impl CsvRecordProducer for BusinessEntity {
    fn csv_header() -> Vec<String> {
        Asset::csv_header()
    }

    fn as_csv_records(&self) -> Vec<Vec<String>> {
        vec![vec![
            self.id.clone(),
            self.name.clone(),
            self.parent_name.clone().unwrap_or_default(),
        ]]
    }
}
