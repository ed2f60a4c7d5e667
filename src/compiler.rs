//! Request configuration compiler
//!
//! Merges method, URL, parameter rows, header rows, auth and body text into
//! one [`RequestConfig`]. Compilation is total: invalid parts are dropped
//! from the output, never reported from here.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::{self, Credential};
use crate::body;
use crate::keyvalue::KeyValueSet;
use crate::models::{AuthConfig, HttpMethod};

/// Canonical, client-agnostic request description
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Credential>,
}

const REDACTED: &str = "***";

impl RequestConfig {
    /// Two-space indented JSON
    pub fn to_pretty_json(&self) -> String {
        // Maps of strings and parsed JSON values always serialize
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Copy with every value injected by `auth` masked, for logging
    pub fn redacted(&self, auth: &AuthConfig) -> RequestConfig {
        let resolution = auth::resolve(auth);
        let mut config = self.clone();
        mask(&mut config.headers, resolution.header_injections.keys());
        mask(&mut config.params, resolution.param_injections.keys());
        if let Some(credential) = config.auth.as_mut() {
            credential.password = REDACTED.to_string();
        }
        config
    }
}

fn mask<'a>(map: &mut Option<IndexMap<String, String>>, keys: impl Iterator<Item = &'a String>) {
    let Some(map) = map.as_mut() else {
        return;
    };
    for key in keys {
        if let Some(value) = map.get_mut(key) {
            *value = REDACTED.to_string();
        }
    }
}

fn non_empty(map: IndexMap<String, String>) -> Option<IndexMap<String, String>> {
    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

pub fn compile(
    method: HttpMethod,
    url: &str,
    params: &KeyValueSet,
    headers: &KeyValueSet,
    auth: &AuthConfig,
    body_text: &str,
) -> RequestConfig {
    let mut params = params.fold();
    let mut headers = headers.fold();

    // Injections are merged last so they win over user rows
    let resolution = auth::resolve(auth);
    headers.extend(resolution.header_injections);
    params.extend(resolution.param_injections);

    RequestConfig {
        method: method.as_str().to_ascii_lowercase(),
        url: url.to_string(),
        params: non_empty(params),
        headers: non_empty(headers),
        data: body::validate(body_text).into_value(),
        auth: resolution.credential,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiKeyLocation, RequestForm};
    use serde_json::json;

    #[test]
    fn test_bearer_example() {
        let form = RequestForm {
            url: "https://api.example.com".into(),
            auth: AuthConfig::Bearer { token: "abc".into() },
            ..Default::default()
        };
        let config = form.compile();

        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "method": "get",
                "url": "https://api.example.com",
                "headers": { "Authorization": "Bearer abc" }
            })
        );
    }

    #[test]
    fn test_empty_form_emits_only_method_and_url() {
        let config = RequestForm::default().compile();
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({ "method": "get", "url": "" })
        );
    }

    #[test]
    fn test_no_complete_params_omits_params() {
        let mut form = RequestForm::default();
        form.params.push("page", "");
        let off = form.params.push("limit", "10");
        form.params.set_enabled(off, false);

        let config = form.compile();
        assert!(config.params.is_none());
        assert!(!form.compile().to_pretty_json().contains("params"));
    }

    #[test]
    fn test_api_key_header_overwrites_user_header() {
        let mut form = RequestForm::default();
        form.headers.push("X-Test", "a");
        form.auth = AuthConfig::ApiKey {
            key_name: "X-Test".into(),
            key_value: "b".into(),
            key_location: ApiKeyLocation::Header,
        };

        let headers = form.compile().headers.unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Test").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_api_key_query_lands_in_params() {
        let mut form = RequestForm::default();
        form.params.push("q", "rust");
        form.auth = AuthConfig::ApiKey {
            key_name: "api_key".into(),
            key_value: "k".into(),
            key_location: ApiKeyLocation::Query,
        };

        let config = form.compile();
        let params = config.params.unwrap();
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["q", "api_key"]);
        assert!(config.headers.is_none());
    }

    #[test]
    fn test_api_key_query_overwrites_user_param_in_place() {
        let mut form = RequestForm::default();
        form.params.push("api_key", "old");
        form.params.push("page", "2");
        form.auth = AuthConfig::ApiKey {
            key_name: "api_key".into(),
            key_value: "new".into(),
            key_location: ApiKeyLocation::Query,
        };

        let params = form.compile().params.unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["api_key", "page"]);
        assert_eq!(params.get("api_key").map(String::as_str), Some("new"));

        form.params = KeyValueSet::new();
        form.params.push("api_key", "old");
        let params = form.compile().params.unwrap();
        assert_eq!(serde_json::to_value(&params).unwrap(), json!({"api_key": "new"}));
    }

    #[test]
    fn test_bearer_overwrites_user_authorization() {
        let mut form = RequestForm::default();
        form.headers.push("Authorization", "Token old");
        form.auth = AuthConfig::Bearer { token: "new".into() };

        let headers = form.compile().headers.unwrap();
        assert_eq!(headers.get("Authorization").map(String::as_str), Some("Bearer new"));
    }

    #[test]
    fn test_body_valid_and_invalid() {
        let mut form = RequestForm {
            method: HttpMethod::POST,
            body: r#"{"a":1}"#.into(),
            ..Default::default()
        };
        assert_eq!(form.compile().data, Some(json!({"a": 1})));

        form.body = "{bad json".into();
        let config = form.compile();
        assert!(config.data.is_none());
        assert!(!config.to_pretty_json().contains("data"));

        form.body = "   ".into();
        assert!(form.compile().data.is_none());
    }

    #[test]
    fn test_basic_credential_and_partial() {
        let mut form = RequestForm {
            auth: AuthConfig::Basic {
                username: "alice".into(),
                password: String::new(),
            },
            ..Default::default()
        };
        let config = form.compile();
        assert!(config.auth.is_none());
        assert!(config.headers.is_none());

        form.auth = AuthConfig::Basic {
            username: "alice".into(),
            password: "pw".into(),
        };
        assert_eq!(
            serde_json::to_value(form.compile()).unwrap()["auth"],
            json!({"username": "alice", "password": "pw"})
        );
    }

    #[test]
    fn test_method_is_lowercased_and_url_verbatim() {
        let form = RequestForm {
            method: HttpMethod::OPTIONS,
            url: "  not a url ".into(),
            ..Default::default()
        };
        let config = form.compile();
        assert_eq!(config.method, "options");
        assert_eq!(config.url, "  not a url ");
    }

    #[test]
    fn test_compile_is_idempotent() {
        let mut form = RequestForm {
            method: HttpMethod::PUT,
            url: "https://example.com/items".into(),
            body: r#"{"k":[1,2,3]}"#.into(),
            auth: AuthConfig::Bearer { token: "t".into() },
            ..Default::default()
        };
        form.params.push("a", "1");
        form.headers.push("Accept", "application/json");

        assert_eq!(form.compile(), form.compile());
        assert_eq!(form.compile().to_pretty_json(), form.compile().to_pretty_json());
    }

    #[test]
    fn test_redacted_masks_auth_values_only() {
        let mut form = RequestForm {
            url: "https://example.com".into(),
            auth: AuthConfig::ApiKey {
                key_name: "api_key".into(),
                key_value: "s3cret".into(),
                key_location: ApiKeyLocation::Query,
            },
            ..Default::default()
        };
        form.params.push("page", "2");
        form.headers.push("Accept", "text/plain");

        let redacted = form.compile().redacted(&form.auth).to_pretty_json();
        assert!(!redacted.contains("s3cret"));
        assert!(redacted.contains("\"page\": \"2\""));
        assert!(redacted.contains("text/plain"));

        form.auth = AuthConfig::Bearer { token: "tok".into() };
        assert!(!form.compile().redacted(&form.auth).to_pretty_json().contains("tok"));

        form.auth = AuthConfig::Basic {
            username: "alice".into(),
            password: "pw-123".into(),
        };
        let redacted = form.compile().redacted(&form.auth);
        assert_eq!(redacted.auth.unwrap().username, "alice");
        assert!(!form.compile().redacted(&form.auth).to_pretty_json().contains("pw-123"));
    }

    #[test]
    fn test_pretty_json_uses_two_space_indent() {
        let form = RequestForm {
            url: "https://example.com".into(),
            ..Default::default()
        };
        assert_eq!(
            form.compile().to_pretty_json(),
            "{\n  \"method\": \"get\",\n  \"url\": \"https://example.com\"\n}"
        );
    }
}
