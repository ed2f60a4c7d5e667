use serde::{Deserialize, Serialize};
use std::fmt;

use crate::compiler::{self, RequestConfig};
use crate::keyvalue::KeyValueSet;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    DELETE,
    PATCH,
    HEAD,
    OPTIONS,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::PATCH,
            HttpMethod::PATCH => HttpMethod::HEAD,
            HttpMethod::HEAD => HttpMethod::OPTIONS,
            HttpMethod::OPTIONS => HttpMethod::GET,
        }
    }

    /// Methods for which the body editor shows a notice
    pub fn warns_on_body(&self) -> bool {
        matches!(self, HttpMethod::GET | HttpMethod::HEAD | HttpMethod::DELETE)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an API key is injected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    #[default]
    Header,
    Query,
}

impl ApiKeyLocation {
    pub fn toggle(&self) -> ApiKeyLocation {
        match self {
            ApiKeyLocation::Header => ApiKeyLocation::Query,
            ApiKeyLocation::Query => ApiKeyLocation::Header,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApiKeyLocation::Header => "Header",
            ApiKeyLocation::Query => "Query Params",
        }
    }
}

/// Authentication mode selector, without the mode's fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthKind {
    #[default]
    None,
    Bearer,
    Basic,
    ApiKey,
}

impl AuthKind {
    pub fn next(&self) -> AuthKind {
        match self {
            AuthKind::None => AuthKind::Bearer,
            AuthKind::Bearer => AuthKind::Basic,
            AuthKind::Basic => AuthKind::ApiKey,
            AuthKind::ApiKey => AuthKind::None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthKind::None => "No Auth",
            AuthKind::Bearer => "Bearer Token",
            AuthKind::Basic => "Basic Auth",
            AuthKind::ApiKey => "API Key",
        }
    }
}

/// Authentication configuration
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthConfig {
    #[default]
    None,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
    #[serde(rename_all = "camelCase")]
    ApiKey {
        key_name: String,
        key_value: String,
        #[serde(default)]
        key_location: ApiKeyLocation,
    },
}

impl AuthConfig {
    pub fn kind(&self) -> AuthKind {
        match self {
            AuthConfig::None => AuthKind::None,
            AuthConfig::Bearer { .. } => AuthKind::Bearer,
            AuthConfig::Basic { .. } => AuthKind::Basic,
            AuthConfig::ApiKey { .. } => AuthKind::ApiKey,
        }
    }

    /// Fresh configuration for `kind`; nothing from the previous mode survives
    pub fn switch_to(kind: AuthKind) -> AuthConfig {
        match kind {
            AuthKind::None => AuthConfig::None,
            AuthKind::Bearer => AuthConfig::Bearer {
                token: String::new(),
            },
            AuthKind::Basic => AuthConfig::Basic {
                username: String::new(),
                password: String::new(),
            },
            AuthKind::ApiKey => AuthConfig::ApiKey {
                key_name: String::new(),
                key_value: String::new(),
                key_location: ApiKeyLocation::Header,
            },
        }
    }
}

/// The request being edited
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestForm {
    pub method: HttpMethod,
    pub url: String,
    pub params: KeyValueSet,
    pub headers: KeyValueSet,
    pub auth: AuthConfig,
    pub body: String,
}

impl RequestForm {
    pub fn compile(&self) -> RequestConfig {
        compiler::compile(
            self.method,
            &self.url,
            &self.params,
            &self.headers,
            &self.auth,
            &self.body,
        )
    }
}
