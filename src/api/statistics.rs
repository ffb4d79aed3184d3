//! Site statistics singleton (`/statistics`).

use serde::Deserialize;
use serde_json::Value;

use super::client::ApiClient;
use super::envelope::unwrap_one;
use super::error::ApiError;
use super::transport::Transport;
use super::types::{StatField, StatisticsData, StatisticsUpdate};

pub fn unwrap_statistics(body: Value) -> Result<StatisticsData, ApiError> {
    unwrap_one(body, "statistics")
}

/// Decode `{ success, statistics }`; `None` unless `success` is true.
pub fn unwrap_statistics_update(body: Value) -> Result<Option<StatisticsData>, ApiError> {
    #[derive(Deserialize)]
    struct UpdateResponse {
        #[serde(default)]
        success: bool,
        #[serde(default)]
        statistics: Option<StatisticsData>,
    }

    let resp: UpdateResponse =
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(if resp.success { resp.statistics } else { None })
}

pub async fn fetch_statistics<T: Transport>(
    client: &ApiClient<T>,
) -> Result<StatisticsData, ApiError> {
    unwrap_statistics(client.get("/statistics").await?)
}

pub async fn update_statistics<T: Transport>(
    client: &ApiClient<T>,
    update: &StatisticsUpdate,
) -> Result<Option<StatisticsData>, ApiError> {
    unwrap_statistics_update(client.put_json("/statistics", update).await?)
}

/// Increase one counter by one, starting from the server's current value.
pub async fn increment_statistic<T: Transport>(
    client: &ApiClient<T>,
    field: StatField,
) -> Result<Option<StatisticsData>, ApiError> {
    let current = fetch_statistics(client).await?;
    let next = field.read(&current) + 1.0;
    let update = field.update(next).ok_or_else(|| {
        ApiError::Request(format!("Invalid value {} for {}", next, field.as_str()))
    })?;
    update_statistics(client, &update).await
}
