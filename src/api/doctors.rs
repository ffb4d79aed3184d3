//! Doctor directory (`/doctors`).
//!
//! Creates and updates carry a portrait, so they are sent as multipart.

use serde_json::Value;

use super::client::ApiClient;
use super::envelope::{unwrap_list, unwrap_one};
use super::error::ApiError;
use super::multipart::MultipartForm;
use super::transport::Transport;
use super::types::{DeleteResponse, Doctor, DoctorFilter};
use super::users::unwrap_delete;

pub fn unwrap_doctors(body: Value) -> Result<Vec<Doctor>, ApiError> {
    unwrap_list(body, "doctors")
}

pub fn unwrap_doctor(body: Value) -> Result<Doctor, ApiError> {
    unwrap_one(body, "doctor")
}

pub async fn fetch_doctors<T: Transport>(
    client: &ApiClient<T>,
    filter: &DoctorFilter,
) -> Result<Vec<Doctor>, ApiError> {
    unwrap_doctors(client.get_with_query("/doctors", filter.to_query()).await?)
}

/// Free-text search: the term is matched against both name and specialty.
pub async fn search_doctors<T: Transport>(
    client: &ApiClient<T>,
    term: &str,
) -> Result<Vec<Doctor>, ApiError> {
    let filter = DoctorFilter {
        name: Some(term.to_string()),
        specialty: Some(term.to_string()),
    };
    fetch_doctors(client, &filter).await
}

pub async fn fetch_doctor<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
) -> Result<Doctor, ApiError> {
    unwrap_doctor(client.get(&format!("/doctors/{}", id)).await?)
}

pub async fn create_doctor<T: Transport>(
    client: &ApiClient<T>,
    form: MultipartForm,
) -> Result<Doctor, ApiError> {
    unwrap_doctor(client.post_multipart("/doctors", form).await?)
}

pub async fn update_doctor<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
    form: MultipartForm,
) -> Result<Doctor, ApiError> {
    unwrap_doctor(client.put_multipart(&format!("/doctors/{}", id), form).await?)
}

pub async fn delete_doctor<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
) -> Result<DeleteResponse, ApiError> {
    Ok(unwrap_delete(client.delete(&format!("/doctors/{}", id)).await?))
}
