//! # reqform
//!
//! A terminal editor that compiles HTTP request forms into a canonical,
//! client-agnostic request configuration.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, DELETE, PATCH, HEAD, OPTIONS
//! - Query params and headers as ordered key/value rows with per-row validation
//! - Auth support (Bearer, Basic, API key in header or query)
//! - JSON body validation and formatting
//! - Live preview of the compiled configuration as JSON or cURL
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Dispatch Layer (Tokio runtime)

pub mod auth;
pub mod body;
pub mod compiler;
pub mod constants;
pub mod curl;
pub mod error;
pub mod keyvalue;
pub mod models;
pub mod validation;
pub mod ui;
pub mod messages;
pub mod app;
pub mod dispatch;

// Re-export commonly used types
pub use models::{ApiKeyLocation, AuthConfig, AuthKind, HttpMethod, RequestForm};
pub use keyvalue::{KeyValuePair, KeyValueSet, RowFault, RowId};
pub use auth::{resolve, AuthResolution, Credential};
pub use body::BodyStatus;
pub use compiler::{compile, RequestConfig};
pub use curl::to_curl;
pub use error::ValidationError;
pub use validation::{FormValidationState, Unit};
pub use messages::{UiEvent, DispatchCommand, DispatchResponse, RenderState};
pub use app::{AppState, AppActor};
pub use dispatch::DispatchActor;
