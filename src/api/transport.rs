//! Request/response values and the network seam.
//!
//! [`ApiClient`](super::client::ApiClient) builds an [`ApiRequest`], injects
//! credentials, and hands it to a [`Transport`]. Production uses
//! [`HttpTransport`]; tests supply a recording mock.

use reqwest::{Client, Method};
use serde_json::Value;

use super::error::ApiError;
use super::multipart::MultipartForm;

/// Request body variants.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(MultipartForm),
}

/// One outgoing call, relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to `{origin}/api`, starting with `/`.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status code and raw body of a received response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as JSON; an empty body is `null`.
    pub fn json(&self) -> Result<Value, ApiError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Sends requests and returns whatever the server answered.
///
/// Implementations return `Ok` for every received response, including
/// error statuses; `Err` is reserved for local and network failures.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// `reqwest`-backed transport bound to the API base URL.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` (already including `/api`).
    ///
    /// No explicit timeout is configured; transport defaults apply.
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .user_agent(concat!("vedavayu-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self.client.request(request.method.clone(), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.multipart(form.clone().into_reqwest()?),
        };

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(ApiResponse::new(204, Vec::new()).json().unwrap(), Value::Null);
        assert_eq!(ApiResponse::new(200, b"  \n".to_vec()).json().unwrap(), Value::Null);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let resp = ApiResponse::new(200, b"<html>".to_vec());
        assert!(matches!(resp.json(), Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_success_range() {
        assert!(ApiResponse::new(201, Vec::new()).is_success());
        assert!(!ApiResponse::new(301, Vec::new()).is_success());
        assert!(!ApiResponse::new(401, Vec::new()).is_success());
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let mut req = ApiRequest::new(Method::GET, "/doctors");
        req.headers
            .push(("Authorization".into(), "Bearer abc".into()));
        assert_eq!(req.header("authorization"), Some("Bearer abc"));
        assert_eq!(req.header("x-missing"), None);
    }

    #[test]
    fn test_base_url_trimmed() {
        let transport = HttpTransport::new("http://localhost:5000/api/");
        assert_eq!(transport.base_url(), "http://localhost:5000/api");
    }
}
