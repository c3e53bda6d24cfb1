//! Asset, business entity, and sensor operations against the monitoring API.
//!
//! All operations share one bearer token acquired at the start of the run
//! and issue a single attempt per request. Sensor retrieval fans out over a
//! list of asset IDs; the default mode is strictly sequential, with an
//! opt-in bounded-concurrency mode that preserves the same output order.

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::auth::AccessToken;
use crate::http::{ApiError, HttpClient};
use crate::model::{
    Asset, AssetListResponse, BusinessEntity, BusinessEntityListResponse, Sensor,
};

/// Parameters for one bounded page of the asset listing.
///
/// There is no automatic pagination: one call yields at most `limit` assets
/// starting at offset `after`. Requesting further pages is the caller's
/// responsibility.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetQuery {
    pub asset_type: String,
    pub after: u32,
    pub limit: u32,
    pub sort: String,
}

impl Default for AssetQuery {
    fn default() -> Self {
        AssetQuery {
            asset_type: "crac".to_string(),
            after: 0,
            limit: 10,
            sort: "+Id".to_string(),
        }
    }
}

pub struct ApiClient {
    base_url: String,
    http: HttpClient,
}

impl ApiClient {
    pub fn new(base_url: String, access_token: AccessToken) -> Result<ApiClient, ApiError> {
        Ok(ApiClient {
            base_url,
            http: HttpClient::new(access_token)?,
        })
    }

    /// Fetch one page of assets filtered by type.
    ///
    /// `GET /api/asset/assets`; returns the `data` field of the envelope
    /// verbatim.
    pub async fn list_assets(&self, query: &AssetQuery) -> Result<Vec<Asset>, ApiError> {
        let url = format!("{}/api/asset/assets", self.base_url);
        let params = [
            ("assetType", query.asset_type.clone()),
            ("includeDimensions", "false".to_string()),
            ("(after)", query.after.to_string()),
            ("(limit)", query.limit.to_string()),
            ("(sort)", query.sort.clone()),
        ];

        info!("Requesting asset list");
        let response: AssetListResponse = self.http.get_json(&url, &params).await?;
        debug!("Response metadata: {:?}", response.metadata);

        Ok(response.data)
    }

    /// Fetch one page of business entities.
    ///
    /// `GET /api/asset/businessEntities/advancedCollection` with
    /// `skip`/`take` paging; a parallel variant of the asset listing with a
    /// different endpoint and parameter names.
    pub async fn list_business_entities(
        &self,
        skip: u32,
        take: u32,
    ) -> Result<Vec<BusinessEntity>, ApiError> {
        let url = format!(
            "{}/api/asset/businessEntities/advancedCollection",
            self.base_url
        );
        let params = [("skip", skip.to_string()), ("take", take.to_string())];

        info!("Requesting business entity list");
        let response: BusinessEntityListResponse = self.http.get_json(&url, &params).await?;
        debug!("Response metadata: {:?}", response.metadata);

        Ok(response.data)
    }

    /// Fetch the sensor list for one asset.
    ///
    /// `GET /api/asset/sensors/{assetId}` returns a bare JSON array, not a
    /// `data` envelope like the listing endpoints. Every element is tagged
    /// with the owning asset ID before returning, since the raw payload
    /// does not carry it.
    pub async fn sensors_for_asset(&self, asset_id: &str) -> Result<Vec<Sensor>, ApiError> {
        let url = format!("{}/api/asset/sensors/{}", self.base_url, asset_id);

        info!("Requesting sensors for asset {}", asset_id);
        let sensors: Vec<Sensor> = self.http.get_json(&url, &[]).await?;

        Ok(tag_with_asset(asset_id, sensors))
    }
}

/// Overwrite each sensor's `asset_id` with the owning asset's ID.
///
/// Mandatory enrichment: downstream aggregation and export key on
/// `(asset_id, id)` and the raw payload does not supply the first half.
pub fn tag_with_asset(asset_id: &str, mut sensors: Vec<Sensor>) -> Vec<Sensor> {
    for sensor in &mut sensors {
        sensor.asset_id = asset_id.to_string();
    }
    sensors
}

/// Source of sensor lists keyed by asset ID.
///
/// The seam between aggregation and the HTTP client; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait SensorSource {
    async fn sensors_for_asset(&self, asset_id: &str) -> Result<Vec<Sensor>, ApiError>;
}

#[async_trait]
impl SensorSource for ApiClient {
    async fn sensors_for_asset(&self, asset_id: &str) -> Result<Vec<Sensor>, ApiError> {
        ApiClient::sensors_for_asset(self, asset_id).await
    }
}

/// Fan a list of asset IDs out across the source, strictly sequentially,
/// and concatenate the results in input order.
///
/// The first failing asset aborts the whole batch; nothing fetched so far is
/// returned. An empty input yields an empty result.
pub async fn collect_sensors<S>(source: &S, asset_ids: &[String]) -> Result<Vec<Sensor>, ApiError>
where
    S: SensorSource + Sync,
{
    let mut sensors = Vec::new();

    for asset_id in asset_ids {
        let asset_sensors = source.sensors_for_asset(asset_id).await?;
        sensors.extend(asset_sensors);
    }

    Ok(sensors)
}

/// Bounded-concurrency variant of [`collect_sensors`].
///
/// At most `limit` requests are in flight at once. `buffered` yields
/// completed batches in input order, so the output is identical to the
/// sequential mode; any failure still aborts the whole batch.
pub async fn collect_sensors_concurrent<S>(
    source: &S,
    asset_ids: &[String],
    limit: usize,
) -> Result<Vec<Sensor>, ApiError>
where
    S: SensorSource + Sync,
{
    let batches: Vec<Vec<Sensor>> = stream::iter(asset_ids)
        .map(|asset_id| source.sensors_for_asset(asset_id))
        .buffered(limit.max(1))
        .try_collect()
        .await?;

    Ok(batches.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn sensor(id: &str, name: &str) -> Sensor {
        Sensor {
            id: id.to_string(),
            asset_id: String::new(),
            name: name.to_string(),
            last_value_update: None,
            value: None,
            unit_string: None,
        }
    }

    fn decode_error() -> ApiError {
        ApiError::JsonError(serde_json::from_str::<serde_json::Value>("not json").unwrap_err())
    }

    /// In-memory sensor source recording the order of requested asset IDs.
    struct FakeSource {
        sensors: HashMap<String, Vec<Sensor>>,
        failing: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        fn new(sensors: HashMap<String, Vec<Sensor>>) -> FakeSource {
            FakeSource {
                sensors,
                failing: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing_on(mut self, asset_id: &str) -> FakeSource {
            self.failing = Some(asset_id.to_string());
            self
        }
    }

    #[async_trait]
    impl SensorSource for FakeSource {
        async fn sensors_for_asset(&self, asset_id: &str) -> Result<Vec<Sensor>, ApiError> {
            self.calls.lock().unwrap().push(asset_id.to_string());

            if self.failing.as_deref() == Some(asset_id) {
                return Err(decode_error());
            }

            let sensors = self.sensors.get(asset_id).cloned().unwrap_or_default();
            Ok(tag_with_asset(asset_id, sensors))
        }
    }

    fn two_asset_source() -> FakeSource {
        let mut sensors = HashMap::new();
        sensors.insert(
            "A".to_string(),
            vec![sensor("a1", "Temp"), sensor("a2", "Humidity")],
        );
        sensors.insert("B".to_string(), vec![sensor("b1", "Airflow")]);
        FakeSource::new(sensors)
    }

    #[test]
    fn tagging_overwrites_any_prior_asset_id() {
        let mut stale = sensor("s1", "Temp");
        stale.asset_id = "other".to_string();

        let tagged = tag_with_asset("X", vec![stale, sensor("s2", "Humidity")]);

        assert!(tagged.iter().all(|s| s.asset_id == "X"));
    }

    #[tokio::test]
    async fn sequential_aggregation_preserves_input_order() {
        let source = two_asset_source();
        let ids = vec!["A".to_string(), "B".to_string()];

        let sensors = collect_sensors(&source, &ids).await.unwrap();

        let keys: Vec<(String, String)> = sensors
            .iter()
            .map(|s| (s.asset_id.clone(), s.id.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("A".to_string(), "a1".to_string()),
                ("A".to_string(), "a2".to_string()),
                ("B".to_string(), "b1".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let source = two_asset_source();

        let sensors = collect_sensors(&source, &[]).await.unwrap();
        assert!(sensors.is_empty());

        let sensors = collect_sensors_concurrent(&source, &[], 4).await.unwrap();
        assert!(sensors.is_empty());
    }

    #[tokio::test]
    async fn unknown_asset_contributes_no_records() {
        let source = two_asset_source();
        let ids = vec!["A".to_string(), "missing".to_string()];

        let sensors = collect_sensors(&source, &ids).await.unwrap();
        assert_eq!(sensors.len(), 2);
    }

    #[tokio::test]
    async fn failure_aborts_before_remaining_assets() {
        let source = two_asset_source().failing_on("A");
        let ids = vec!["A".to_string(), "B".to_string()];

        let result = collect_sensors(&source, &ids).await;

        assert!(matches!(result, Err(ApiError::JsonError(_))));
        // The failing asset was the only one ever requested.
        assert_eq!(*source.calls.lock().unwrap(), vec!["A".to_string()]);
    }

    #[tokio::test]
    async fn concurrent_aggregation_matches_sequential_order() {
        let source = two_asset_source();
        let ids = vec!["B".to_string(), "A".to_string()];

        let sequential = collect_sensors(&source, &ids).await.unwrap();
        let concurrent = collect_sensors_concurrent(&source, &ids, 8).await.unwrap();

        assert_eq!(sequential, concurrent);
        assert_eq!(concurrent[0].asset_id, "B");
    }

    #[tokio::test]
    async fn concurrent_failure_fails_the_whole_batch() {
        let source = two_asset_source().failing_on("B");
        let ids = vec!["A".to_string(), "B".to_string()];

        let result = collect_sensors_concurrent(&source, &ids, 2).await;
        assert!(result.is_err());
    }
}
