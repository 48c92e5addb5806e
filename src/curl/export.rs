//! cURL command generation
//!
//! Serializes a request template (with its environment applied) into a
//! shell-correct `curl` command for sharing. Clauses are joined with
//! line continuations for readability; the whitespace is not significant
//! to a reparse.

use crate::auth;
use crate::http::method;
use crate::models::{BodyType, Environment, Request};
use crate::request::resolve_url;
use crate::vars;
use url::form_urlencoded;

/// Generate an equivalent curl command for a request
///
/// Pure function; the emitted `--url` carries the same merged query string
/// the materializer would send, so reparsing the output reproduces the
/// materialized request.
pub fn generate_curl_command(request: &Request, environment: &Environment) -> String {
    let url = resolve_url(&request.url, &request.params, environment);

    let mut clauses: Vec<String> = Vec::new();
    clauses.push(format!("curl --request {}", request.method));
    clauses.push(format!("--url {}", shell_escape(&url)));

    let headers: Vec<(String, String)> = request
        .headers
        .iter()
        .filter(|h| h.enabled && !h.key.is_empty())
        .map(|h| (h.key.clone(), vars::substitute_str(&h.value, environment)))
        .collect();

    // Synthesized auth comes first, and only when the user has not already
    // written an Authorization header themselves
    let resolved_auth = auth::resolve(&request.auth, environment);
    if let Some(value) = auth::auth_header(&resolved_auth) {
        if !headers
            .iter()
            .any(|(key, _)| key.eq_ignore_ascii_case("authorization"))
        {
            clauses.push(format!(
                "--header {}",
                shell_escape(&format!("Authorization: {}", value))
            ));
        }
    }

    for (key, value) in &headers {
        // For multipart bodies the transport computes the boundary, so a
        // stale Content-Type row must not be emitted
        if request.body_type == BodyType::FormData && key.eq_ignore_ascii_case("content-type") {
            continue;
        }
        clauses.push(format!(
            "--header {}",
            shell_escape(&format!("{}: {}", key, value))
        ));
    }

    if method::supports_body(&request.method) {
        emit_body(&mut clauses, request, environment);
    }

    clauses.join(" \\\n  ")
}

fn emit_body(clauses: &mut Vec<String>, request: &Request, environment: &Environment) {
    match request.body_type {
        BodyType::FormData => {
            for entry in request
                .form_data
                .iter()
                .filter(|e| e.enabled && !e.key.is_empty())
            {
                let value = vars::substitute_str(&entry.value, environment);
                clauses.push(format!(
                    "--form {}",
                    shell_escape(&format!("{}={}", entry.key, value))
                ));
            }
        }
        BodyType::UrlEncoded => {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for entry in request
                .form_data
                .iter()
                .filter(|e| e.enabled && !e.key.is_empty())
            {
                serializer.append_pair(&entry.key, &vars::substitute_str(&entry.value, environment));
            }
            let body = serializer.finish();
            if !body.is_empty() {
                clauses.push(format!("--data {}", shell_escape(&body)));
            }
        }
        BodyType::Raw => {
            let body = vars::substitute_str(&request.body, environment);
            if !body.is_empty() {
                clauses.push(format!("--data {}", shell_escape(&body)));
            }
        }
    }
}

/// Shell-escape a value for safe inclusion in a command
///
/// Wraps in single quotes and rewrites embedded single quotes as `'\''`;
/// an empty value renders as `''`.
pub fn shell_escape(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthConfig, KeyValue, Variable, VariableType};

    fn post(url: &str) -> Request {
        Request {
            method: "POST".to_string(),
            url: url.to_string(),
            ..Request::new()
        }
    }

    #[test]
    fn test_shell_escape() {
        assert_eq!(shell_escape("plain"), "'plain'");
        assert_eq!(shell_escape("it's"), r"'it'\''s'");
        assert_eq!(shell_escape(""), "''");
    }

    #[test]
    fn test_minimal_get() {
        let req = Request {
            url: "https://example.com/api".to_string(),
            ..Request::new()
        };
        assert_eq!(
            generate_curl_command(&req, &Vec::new()),
            "curl --request GET \\\n  --url 'https://example.com/api'"
        );
    }

    #[test]
    fn test_headers_and_raw_body() {
        let mut req = post("https://example.com/api");
        req.headers.push(KeyValue::new("Content-Type", "application/json"));
        req.body = r#"{"k":1}"#.to_string();
        let cmd = generate_curl_command(&req, &Vec::new());
        assert_eq!(
            cmd,
            "curl --request POST \\\n  --url 'https://example.com/api' \\\n  --header 'Content-Type: application/json' \\\n  --data '{\"k\":1}'"
        );
    }

    #[test]
    fn test_body_with_single_quote_is_escaped() {
        let mut req = post("https://x/p");
        req.body = "it's".to_string();
        let cmd = generate_curl_command(&req, &Vec::new());
        assert!(cmd.ends_with(r"--data 'it'\''s'"));
    }

    #[test]
    fn test_no_unescaped_value_ever_emitted() {
        let mut req = post("https://x/p");
        req.headers.push(KeyValue::new("X-Note", "a 'quoted' word"));
        let cmd = generate_curl_command(&req, &Vec::new());
        assert!(cmd.contains(r"'X-Note: a '\''quoted'\'' word'"));
    }

    #[test]
    fn test_get_emits_no_body() {
        let mut req = Request {
            url: "https://x/p".to_string(),
            ..Request::new()
        };
        req.body = "ignored".to_string();
        let cmd = generate_curl_command(&req, &Vec::new());
        assert!(!cmd.contains("--data"));
    }

    #[test]
    fn test_auth_header_synthesized_before_user_headers() {
        let mut req = post("https://x/p");
        req.headers.push(KeyValue::new("Accept", "application/json"));
        req.auth = AuthConfig::Bearer {
            token: "tok".to_string(),
        };
        let cmd = generate_curl_command(&req, &Vec::new());
        let auth_pos = cmd.find("Authorization: Bearer tok").unwrap();
        let accept_pos = cmd.find("Accept:").unwrap();
        assert!(auth_pos < accept_pos);
    }

    #[test]
    fn test_explicit_auth_header_suppresses_synthesis() {
        let mut req = post("https://x/p");
        req.headers.push(KeyValue::new("Authorization", "Bearer mine"));
        req.auth = AuthConfig::Bearer {
            token: "other".to_string(),
        };
        let cmd = generate_curl_command(&req, &Vec::new());
        assert!(cmd.contains("Bearer mine"));
        assert!(!cmd.contains("Bearer other"));
    }

    #[test]
    fn test_form_data_emission_suppresses_content_type() {
        let mut req = post("https://x/p");
        req.body_type = BodyType::FormData;
        req.headers
            .push(KeyValue::new("Content-Type", "multipart/form-data"));
        req.form_data.push(KeyValue::new("name", "Ada"));
        let mut disabled = KeyValue::new("skip", "me");
        disabled.enabled = false;
        req.form_data.push(disabled);
        let cmd = generate_curl_command(&req, &Vec::new());
        assert!(cmd.contains("--form 'name=Ada'"));
        assert!(!cmd.contains("Content-Type"));
        assert!(!cmd.contains("skip"));
    }

    #[test]
    fn test_urlencoded_body_is_percent_encoded() {
        let mut req = post("https://x/p");
        req.body_type = BodyType::UrlEncoded;
        req.form_data.push(KeyValue::new("q", "a b&c"));
        req.form_data.push(KeyValue::new("lang", "en"));
        let cmd = generate_curl_command(&req, &Vec::new());
        assert!(cmd.contains("--data 'q=a+b%26c&lang=en'"));
    }

    #[test]
    fn test_variables_resolved_throughout() {
        let mut req = post("https://{{host}}/v1");
        req.headers.push(KeyValue::new("X-Token", "{{tok}}"));
        req.body = r#"{"n": {{n}}}"#.to_string();
        let environment = vec![
            Variable::new("host", "api.test", VariableType::String),
            Variable::new("tok", "abc", VariableType::String),
            Variable::new("n", "42", VariableType::Number),
        ];
        let cmd = generate_curl_command(&req, &environment);
        assert!(cmd.contains("--url 'https://api.test/v1'"));
        assert!(cmd.contains("'X-Token: abc'"));
        assert!(cmd.contains(r#"--data '{"n": 42}'"#));
    }

    #[test]
    fn test_params_merged_into_emitted_url() {
        let mut req = Request {
            url: "https://x/p?a=1".to_string(),
            ..Request::new()
        };
        req.params.push(KeyValue::new("a", "2"));
        req.params.push(KeyValue::new("b", "3"));
        let cmd = generate_curl_command(&req, &Vec::new());
        assert!(cmd.contains("--url 'https://x/p?a=2&b=3'"));
    }
}
