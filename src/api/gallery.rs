//! Photo gallery (`/gallery`).

use serde_json::Value;

use super::client::ApiClient;
use super::envelope::{unwrap_list, unwrap_one};
use super::error::ApiError;
use super::multipart::MultipartForm;
use super::transport::Transport;
use super::types::{DeleteResponse, GalleryImage};
use super::users::unwrap_delete;

pub fn unwrap_gallery(body: Value) -> Result<Vec<GalleryImage>, ApiError> {
    unwrap_list(body, "gallery")
}

/// Upload responses use `image` rather than `gallery`.
pub fn unwrap_gallery_image(body: Value) -> Result<GalleryImage, ApiError> {
    unwrap_one(body, "image")
}

pub async fn fetch_gallery<T: Transport>(
    client: &ApiClient<T>,
) -> Result<Vec<GalleryImage>, ApiError> {
    unwrap_gallery(client.get("/gallery").await?)
}

pub async fn upload_gallery_image<T: Transport>(
    client: &ApiClient<T>,
    form: MultipartForm,
) -> Result<GalleryImage, ApiError> {
    unwrap_gallery_image(client.post_multipart("/gallery", form).await?)
}

pub async fn delete_gallery_image<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
) -> Result<DeleteResponse, ApiError> {
    Ok(unwrap_delete(client.delete(&format!("/gallery/{}", id)).await?))
}
