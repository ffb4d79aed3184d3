//! Clinic services (`/services`).

use serde_json::Value;

use super::client::ApiClient;
use super::envelope::{unwrap_list, unwrap_one};
use super::error::ApiError;
use super::transport::Transport;
use super::types::{DeleteResponse, NewService, Service, ServiceUpdate};
use super::users::unwrap_delete;

pub fn unwrap_services(body: Value) -> Result<Vec<Service>, ApiError> {
    unwrap_list(body, "services")
}

pub fn unwrap_service(body: Value) -> Result<Service, ApiError> {
    unwrap_one(body, "service")
}

pub async fn fetch_services<T: Transport>(client: &ApiClient<T>) -> Result<Vec<Service>, ApiError> {
    unwrap_services(client.get("/services").await?)
}

pub async fn fetch_service<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
) -> Result<Service, ApiError> {
    unwrap_service(client.get(&format!("/services/{}", id)).await?)
}

pub async fn create_service<T: Transport>(
    client: &ApiClient<T>,
    service: &NewService,
) -> Result<Service, ApiError> {
    unwrap_service(client.post_json("/services", service).await?)
}

pub async fn update_service<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
    update: &ServiceUpdate,
) -> Result<Service, ApiError> {
    unwrap_service(client.put_json(&format!("/services/{}", id), update).await?)
}

pub async fn delete_service<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
) -> Result<DeleteResponse, ApiError> {
    Ok(unwrap_delete(client.delete(&format!("/services/{}", id)).await?))
}
