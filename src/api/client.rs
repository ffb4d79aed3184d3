//! Authenticated HTTP client.
//!
//! Every backend call goes through [`ApiClient::dispatch`], which applies two
//! cross-cutting rules:
//!
//! - outbound: attach `Authorization: Bearer <token>` when a session exists;
//! - inbound: normalize the server's error message, run the status-specific
//!   side effects (session teardown on 401, forbidden notice on 403), and
//!   return the error to the caller.
//!
//! Calls are never retried.

use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::error::{extract_error_message, ApiError};
use super::hooks::SessionHooks;
use super::multipart::MultipartForm;
use super::transport::{ApiRequest, ApiResponse, HttpTransport, RequestBody, Transport};
use crate::config::ClientConfig;
use crate::session::SessionStore;

/// Path prefix of endpoints that work without a session.
///
/// A 401 from these must not tear the session down.
pub const PUBLIC_ROUTE_PREFIX: &str = "/banners";

pub fn is_public_route(path: &str) -> bool {
    path.starts_with(PUBLIC_ROUTE_PREFIX)
}

/// HTTP client wrapper for the clinic API.
pub struct ApiClient<T: Transport = HttpTransport> {
    transport: T,
    session: Arc<dyn SessionStore>,
    hooks: Arc<dyn SessionHooks>,
}

impl ApiClient<HttpTransport> {
    /// Create a client for the configured origin (`{origin}/api`).
    pub fn new(
        config: &ClientConfig,
        session: Arc<dyn SessionStore>,
        hooks: Arc<dyn SessionHooks>,
    ) -> Self {
        Self::with_transport(HttpTransport::new(&config.api_base_url()), session, hooks)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(
        transport: T,
        session: Arc<dyn SessionStore>,
        hooks: Arc<dyn SessionHooks>,
    ) -> Self {
        Self {
            transport,
            session,
            hooks,
        }
    }

    /// Session store shared with the rest of the application.
    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a request with credential injection and failure handling.
    pub async fn dispatch(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        if let Some(token) = self.session.token()? {
            request
                .headers
                .push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        let response = self.transport.send(&request).await?;
        if response.is_success() {
            return Ok(response);
        }
        Err(self.handle_failure(&request, &response))
    }

    fn handle_failure(&self, request: &ApiRequest, response: &ApiResponse) -> ApiError {
        let message = extract_error_message(&response.body);

        match response.status {
            401 if is_public_route(&request.path) => {
                log::warn!(
                    "401 from public route {} {}: {}",
                    request.method,
                    request.path,
                    message
                );
            }
            401 => {
                if let Err(e) = self.session.clear() {
                    log::warn!("Failed to clear session after 401: {}", e);
                }
                self.hooks.on_session_expired(&message);
            }
            403 => {
                self.hooks.on_forbidden(&message);
            }
            413 => {
                log::error!("Payload too large: {}", message);
            }
            status => {
                log::error!("API Error {}: {}", status, message);
            }
        }

        ApiError::Status {
            status: response.status,
            message,
        }
    }

    /// GET returning the JSON body.
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.get_with_query(path, Vec::new()).await
    }

    /// GET with query parameters, returning the JSON body.
    pub async fn get_with_query(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<Value, ApiError> {
        self.dispatch(ApiRequest::new(Method::GET, path).query(query))
            .await?
            .json()
    }

    /// POST a JSON body.
    pub async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.send_json(Method::POST, path, body).await
    }

    /// PUT a JSON body.
    pub async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        self.send_json(Method::PUT, path, body).await
    }

    /// POST a multipart form.
    pub async fn post_multipart(&self, path: &str, form: MultipartForm) -> Result<Value, ApiError> {
        self.dispatch(ApiRequest::new(Method::POST, path).body(RequestBody::Multipart(form)))
            .await?
            .json()
    }

    /// PUT a multipart form.
    pub async fn put_multipart(&self, path: &str, form: MultipartForm) -> Result<Value, ApiError> {
        self.dispatch(ApiRequest::new(Method::PUT, path).body(RequestBody::Multipart(form)))
            .await?
            .json()
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.dispatch(ApiRequest::new(Method::DELETE, path))
            .await?
            .json()
    }

    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        // Serialization failure is a local error: nothing is sent.
        let value = serde_json::to_value(body).map_err(|e| ApiError::Request(e.to_string()))?;
        self.dispatch(ApiRequest::new(method, path).body(RequestBody::Json(value)))
            .await?
            .json()
    }
}
