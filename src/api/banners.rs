//! Event banners (`/banners`).
//!
//! The listing is public: it is fetched on the home page without a session,
//! and a 401 from it never ends the session (see `PUBLIC_ROUTE_PREFIX`).

use serde_json::Value;

use super::client::ApiClient;
use super::envelope::{unwrap_list, unwrap_one};
use super::error::ApiError;
use super::transport::Transport;
use super::types::{Banner, BannerUpdate, DeleteResponse, NewBanner};
use super::users::unwrap_delete;

pub fn unwrap_banners(body: Value) -> Result<Vec<Banner>, ApiError> {
    unwrap_list(body, "banners")
}

pub fn unwrap_banner(body: Value) -> Result<Banner, ApiError> {
    unwrap_one(body, "banner")
}

pub async fn fetch_banners<T: Transport>(client: &ApiClient<T>) -> Result<Vec<Banner>, ApiError> {
    unwrap_banners(client.get("/banners").await?)
}

pub async fn create_banner<T: Transport>(
    client: &ApiClient<T>,
    banner: &NewBanner,
) -> Result<Banner, ApiError> {
    unwrap_banner(client.post_json("/banners", banner).await?)
}

pub async fn update_banner<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
    update: &BannerUpdate,
) -> Result<Banner, ApiError> {
    unwrap_banner(client.put_json(&format!("/banners/{}", id), update).await?)
}

pub async fn delete_banner<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
) -> Result<DeleteResponse, ApiError> {
    Ok(unwrap_delete(client.delete(&format!("/banners/{}", id)).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_banner_wrapped() {
        let body = json!({
            "success": true,
            "banner": {
                "_id": "b1", "title": "Yoga camp", "date": "2026-11-01",
                "time": "09:00", "registrationLink": "https://forms.example/yoga"
            }
        });
        let banner = unwrap_banner(body).unwrap();
        assert_eq!(banner.registration_link, "https://forms.example/yoga");
    }
}
