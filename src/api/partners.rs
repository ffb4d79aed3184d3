//! Partner organisations (`/partners`), sent as multipart for logo uploads.

use serde_json::Value;

use super::client::ApiClient;
use super::envelope::{unwrap_list, unwrap_one};
use super::error::ApiError;
use super::multipart::MultipartForm;
use super::transport::Transport;
use super::types::{DeleteResponse, Partner};
use super::users::unwrap_delete;

pub fn unwrap_partners(body: Value) -> Result<Vec<Partner>, ApiError> {
    unwrap_list(body, "partners")
}

pub fn unwrap_partner(body: Value) -> Result<Partner, ApiError> {
    unwrap_one(body, "partner")
}

pub async fn fetch_partners<T: Transport>(client: &ApiClient<T>) -> Result<Vec<Partner>, ApiError> {
    unwrap_partners(client.get("/partners").await?)
}

pub async fn create_partner<T: Transport>(
    client: &ApiClient<T>,
    form: MultipartForm,
) -> Result<Partner, ApiError> {
    unwrap_partner(client.post_multipart("/partners", form).await?)
}

pub async fn update_partner<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
    form: MultipartForm,
) -> Result<Partner, ApiError> {
    unwrap_partner(client.put_multipart(&format!("/partners/{}", id), form).await?)
}

pub async fn delete_partner<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
) -> Result<DeleteResponse, ApiError> {
    Ok(unwrap_delete(client.delete(&format!("/partners/{}", id)).await?))
}
