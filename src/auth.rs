//! Authorization header computation
//!
//! Turns an [`AuthConfig`] into the `Authorization` header value the
//! materializer and exporter synthesize, and decodes Basic credentials
//! found while importing curl commands.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::models::{AuthConfig, Environment};
use crate::vars;

/// Resolve `{{name}}` placeholders inside an auth config's credentials
pub fn resolve(auth: &AuthConfig, environment: &Environment) -> AuthConfig {
    match auth {
        AuthConfig::None => AuthConfig::None,
        AuthConfig::Bearer { token } => AuthConfig::Bearer {
            token: vars::substitute_str(token, environment),
        },
        AuthConfig::Basic { username, password } => AuthConfig::Basic {
            username: vars::substitute_str(username, environment),
            password: vars::substitute_str(password, environment),
        },
    }
}

/// Compute the `Authorization` header value for an auth config
///
/// Returns `None` when the config is `None` or resolves to nothing (empty
/// bearer token, empty Basic credentials) - callers emit no header at all
/// in that case.
pub fn auth_header(auth: &AuthConfig) -> Option<String> {
    match auth {
        AuthConfig::None => None,
        AuthConfig::Bearer { token } => {
            if token.is_empty() {
                None
            } else {
                Some(format!("Bearer {}", token))
            }
        }
        AuthConfig::Basic { username, password } => {
            if username.is_empty() && password.is_empty() {
                None
            } else {
                let credentials = format!("{}:{}", username, password);
                Some(format!("Basic {}", STANDARD.encode(credentials)))
            }
        }
    }
}

/// Decode a Basic auth token (`base64(user:pass)`) into credentials
///
/// Returns `None` when the token is not valid base64 or not UTF-8; a
/// missing colon yields an empty password.
pub fn decode_basic(token: &str) -> Option<(String, String)> {
    let bytes = STANDARD.decode(token).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    match decoded.split_once(':') {
        Some((user, pass)) => Some((user.to_string(), pass.to_string())),
        None => Some((decoded, String::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let auth = AuthConfig::Bearer {
            token: "abc123".to_string(),
        };
        assert_eq!(auth_header(&auth), Some("Bearer abc123".to_string()));
    }

    #[test]
    fn test_empty_bearer_is_none() {
        let auth = AuthConfig::Bearer {
            token: String::new(),
        };
        assert_eq!(auth_header(&auth), None);
    }

    #[test]
    fn test_basic_header_round_trips() {
        let auth = AuthConfig::Basic {
            username: "user".to_string(),
            password: "pa:ss".to_string(),
        };
        let header = auth_header(&auth).unwrap();
        let token = header.strip_prefix("Basic ").unwrap();
        // password keeps everything after the first colon
        assert_eq!(
            decode_basic(token),
            Some(("user".to_string(), "pa:ss".to_string()))
        );
    }

    #[test]
    fn test_basic_with_only_username() {
        let auth = AuthConfig::Basic {
            username: "user".to_string(),
            password: String::new(),
        };
        assert_eq!(auth_header(&auth), Some(format!("Basic {}", STANDARD.encode("user:"))));
    }

    #[test]
    fn test_empty_basic_is_none() {
        let auth = AuthConfig::Basic {
            username: String::new(),
            password: String::new(),
        };
        assert_eq!(auth_header(&auth), None);
    }

    #[test]
    fn test_none_is_none() {
        assert_eq!(auth_header(&AuthConfig::None), None);
    }

    #[test]
    fn test_decode_basic_rejects_garbage() {
        assert_eq!(decode_basic("!!not-base64!!"), None);
    }

    #[test]
    fn test_decode_basic_without_colon() {
        let token = STANDARD.encode("justuser");
        assert_eq!(decode_basic(&token), Some(("justuser".to_string(), String::new())));
    }
}
