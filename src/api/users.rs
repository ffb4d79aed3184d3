//! Admin user management (`/users`).

use serde_json::Value;

use super::client::ApiClient;
use super::envelope::{unwrap_list, unwrap_one};
use super::error::ApiError;
use super::transport::Transport;
use super::types::{DeleteResponse, NewUser, User, UserUpdate};

pub fn unwrap_users(body: Value) -> Result<Vec<User>, ApiError> {
    unwrap_list(body, "users")
}

pub fn unwrap_user(body: Value) -> Result<User, ApiError> {
    unwrap_one(body, "user")
}

pub async fn fetch_users<T: Transport>(client: &ApiClient<T>) -> Result<Vec<User>, ApiError> {
    unwrap_users(client.get("/users").await?)
}

pub async fn fetch_user<T: Transport>(client: &ApiClient<T>, id: &str) -> Result<User, ApiError> {
    unwrap_user(client.get(&format!("/users/{}", id)).await?)
}

pub async fn create_user<T: Transport>(
    client: &ApiClient<T>,
    user: &NewUser,
) -> Result<User, ApiError> {
    unwrap_user(client.post_json("/users", user).await?)
}

pub async fn update_user<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
    update: &UserUpdate,
) -> Result<User, ApiError> {
    unwrap_user(client.put_json(&format!("/users/{}", id), update).await?)
}

pub async fn delete_user<T: Transport>(
    client: &ApiClient<T>,
    id: &str,
) -> Result<DeleteResponse, ApiError> {
    Ok(unwrap_delete(client.delete(&format!("/users/{}", id)).await?))
}

/// Decode a delete acknowledgement.
///
/// The record is already gone once the server answered 2xx, so an empty or
/// oddly shaped body is still a success without a message.
pub(crate) fn unwrap_delete(body: Value) -> DeleteResponse {
    if body.is_null() {
        return DeleteResponse::default();
    }
    serde_json::from_value(body).unwrap_or_else(|e| {
        log::warn!("Unexpected delete response format: {}", e);
        DeleteResponse::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_users_bare_and_wrapped() {
        let record = json!({
            "_id": "u1", "name": "Asha Rao", "email": "asha@example.com",
            "phone": "999", "role": "admin"
        });
        assert_eq!(unwrap_users(json!([record.clone()])).unwrap().len(), 1);
        let wrapped = unwrap_users(json!({ "success": true, "data": [record] })).unwrap();
        assert_eq!(wrapped[0].name, "Asha Rao");
    }

    #[test]
    fn test_unwrap_delete() {
        assert_eq!(unwrap_delete(Value::Null).message, None);
        let ack = unwrap_delete(json!({ "message": "User deleted" }));
        assert_eq!(ack.message.as_deref(), Some("User deleted"));
    }

    #[test]
    fn test_unwrap_delete_tolerates_unexpected_shapes() {
        assert_eq!(unwrap_delete(json!({ "message": 7 })).message, None);
        assert_eq!(unwrap_delete(json!("deleted")).message, None);
        assert_eq!(unwrap_delete(json!({ "success": true })).message, None);
    }
}
