//! Application constants
//!
//! Centralized location for user-facing strings and configuration defaults.

use std::time::Duration;

/// Application name
pub const APP_NAME: &str = "reqform";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log file written next to the working directory
pub const LOG_FILE_NAME: &str = "reqform.log";

/// Simulated latency of the external dispatch on submit
pub const DISPATCH_LATENCY: Duration = Duration::from_millis(2000);

/// Header injected by bearer auth
pub const AUTHORIZATION_HEADER: &str = "Authorization";

pub const SUBMIT_BLOCKED_NOTICE: &str = "Please fix the errors below before sending the request.";

pub const SUBMIT_SUCCESS_NOTICE: &str = "Request configuration generated successfully!";

pub const BODY_METHOD_NOTICE: &str =
    "Request body is typically used with POST, PUT, and PATCH methods.";
