//! About page singleton (`/about`).
//!
//! Updates are a multipart POST because the journey image may be replaced.

use serde_json::Value;

use super::client::ApiClient;
use super::envelope::unwrap_one;
use super::error::ApiError;
use super::multipart::MultipartForm;
use super::transport::Transport;
use super::types::AboutInfo;

pub fn unwrap_about(body: Value) -> Result<AboutInfo, ApiError> {
    unwrap_one(body, "about")
}

pub async fn fetch_about<T: Transport>(client: &ApiClient<T>) -> Result<AboutInfo, ApiError> {
    unwrap_about(client.get("/about").await?)
}

pub async fn update_about<T: Transport>(
    client: &ApiClient<T>,
    form: MultipartForm,
) -> Result<AboutInfo, ApiError> {
    unwrap_about(client.post_multipart("/about", form).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_about_update_envelope() {
        let body = json!({
            "success": true,
            "about": {
                "title": "Our journey", "content": "Since 1998",
                "statistics": { "doctors": 12, "therapies": 40 }
            }
        });
        let about = unwrap_about(body).unwrap();
        assert_eq!(about.title, "Our journey");
        assert_eq!(about.statistics.unwrap().therapies, 40);
    }

    #[test]
    fn test_unwrap_about_bare() {
        let body = json!({ "_id": "a1", "title": "About", "content": "Text", "journeyImage": "/uploads/j.jpg" });
        let about = unwrap_about(body).unwrap();
        assert_eq!(about.journey_image.as_deref(), Some("/uploads/j.jpg"));
    }
}
