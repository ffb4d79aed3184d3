//! Client library for the Vedavayu clinic site API.
//!
//! All business state lives on the backend; this crate is the data-binding
//! layer over it: an authenticated HTTP client with centralized session
//! handling, typed resource access, local persistence for the session and
//! audit log, and a passive backend health monitor.

pub mod api;
pub mod config;
pub mod health;
pub mod local_store;
pub mod media;
pub mod reports;
pub mod session;

pub use api::{ApiClient, ApiError};
pub use config::ClientConfig;
pub use session::{SessionStore, SessionError};
