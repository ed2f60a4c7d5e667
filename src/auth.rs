//! Authentication resolution
//!
//! Turns the selected auth mode into header/query injections or a
//! credential pair. Partially filled modes resolve to nothing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::AUTHORIZATION_HEADER;
use crate::models::{ApiKeyLocation, AuthConfig};

/// Username/password pair handed to the HTTP client separately
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// Output of [`resolve`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthResolution {
    pub header_injections: IndexMap<String, String>,
    pub param_injections: IndexMap<String, String>,
    pub credential: Option<Credential>,
}

impl AuthResolution {
    pub fn is_empty(&self) -> bool {
        self.header_injections.is_empty()
            && self.param_injections.is_empty()
            && self.credential.is_none()
    }
}

pub fn resolve(auth: &AuthConfig) -> AuthResolution {
    let mut resolution = AuthResolution::default();

    match auth {
        AuthConfig::None => {}
        AuthConfig::Bearer { token } => {
            if !token.is_empty() {
                resolution
                    .header_injections
                    .insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", token));
            }
        }
        AuthConfig::Basic { username, password } => {
            if !username.is_empty() && !password.is_empty() {
                resolution.credential = Some(Credential {
                    username: username.clone(),
                    password: password.clone(),
                });
            }
        }
        AuthConfig::ApiKey {
            key_name,
            key_value,
            key_location,
        } => {
            if !key_name.is_empty() && !key_value.is_empty() {
                let target = match key_location {
                    ApiKeyLocation::Header => &mut resolution.header_injections,
                    ApiKeyLocation::Query => &mut resolution.param_injections,
                };
                target.insert(key_name.clone(), key_value.clone());
            }
        }
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_resolves_to_nothing() {
        assert!(resolve(&AuthConfig::None).is_empty());
    }

    #[test]
    fn test_bearer_injects_authorization() {
        let resolution = resolve(&AuthConfig::Bearer { token: "abc".into() });
        assert_eq!(
            resolution.header_injections.get("Authorization").map(String::as_str),
            Some("Bearer abc")
        );
        assert!(resolution.param_injections.is_empty());
        assert!(resolution.credential.is_none());
    }

    #[test]
    fn test_empty_bearer_is_dropped() {
        assert!(resolve(&AuthConfig::Bearer { token: String::new() }).is_empty());
    }

    #[test]
    fn test_basic_requires_both_fields() {
        let partial = AuthConfig::Basic {
            username: "alice".into(),
            password: String::new(),
        };
        assert!(resolve(&partial).is_empty());

        let full = AuthConfig::Basic {
            username: "alice".into(),
            password: "pw".into(),
        };
        assert_eq!(
            resolve(&full).credential,
            Some(Credential {
                username: "alice".into(),
                password: "pw".into()
            })
        );
    }

    #[test]
    fn test_api_key_location_picks_target() {
        let header = resolve(&AuthConfig::ApiKey {
            key_name: "X-Key".into(),
            key_value: "v".into(),
            key_location: ApiKeyLocation::Header,
        });
        assert_eq!(header.header_injections.len(), 1);
        assert!(header.param_injections.is_empty());

        let query = resolve(&AuthConfig::ApiKey {
            key_name: "api_key".into(),
            key_value: "v".into(),
            key_location: ApiKeyLocation::Query,
        });
        assert!(query.header_injections.is_empty());
        assert_eq!(query.param_injections.get("api_key").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_partial_api_key_is_dropped() {
        let resolution = resolve(&AuthConfig::ApiKey {
            key_name: String::new(),
            key_value: "v".into(),
            key_location: ApiKeyLocation::Query,
        });
        assert!(resolution.is_empty());
    }
}
