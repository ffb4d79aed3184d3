//! Clinic backend API access.
//!
//! Provides the authenticated HTTP client, session side-effect hooks,
//! envelope decoding, and typed data-access functions for every resource.

pub mod about;
pub mod auth;
pub mod banners;
pub mod client;
pub mod doctors;
pub mod envelope;
pub mod error;
pub mod gallery;
pub mod hooks;
pub mod multipart;
pub mod partners;
pub mod services;
pub mod statistics;
pub mod transport;
pub mod types;
pub mod users;


pub use client::{is_public_route, ApiClient, PUBLIC_ROUTE_PREFIX};
pub use error::{ApiError, UNKNOWN_ERROR};
pub use hooks::{Navigator, RedirectHooks, SessionHooks};
pub use multipart::{FilePart, MultipartForm};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, RequestBody, Transport};
