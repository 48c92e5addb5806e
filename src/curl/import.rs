//! cURL command import
//!
//! Walks the tokens of a pasted `curl` invocation and builds a request
//! template: method, URL, query params, headers, auth and body. This is the
//! only engine operation that can fail outward - and only when the command
//! does not start with `curl` or no URL can be located. Every other
//! malformed fragment (a header without a colon, an undecodable Basic
//! token) is skipped rather than fatal, because pasted commands are
//! routinely edited mid-flight.

use url::form_urlencoded;
use url::Url;

use crate::auth;
use crate::curl::tokenizer::{tokenize, unquote};
use crate::errors::{RestpadError, Result};
use crate::http::method;
use crate::models::{AuthConfig, BodyType, KeyValue, Request};

/// Flags that consume the following token as their value
///
/// Used while locating the positional URL: a token sitting in one of these
/// value slots can never be the URL.
const VALUE_TAKING_FLAGS: &[&str] = &[
    "-X",
    "--request",
    "-H",
    "--header",
    "-d",
    "--data",
    "--data-raw",
    "--data-binary",
    "--data-urlencode",
    "-u",
    "--user",
    "--form",
    "--url",
];

/// Stored in place of `--form` file references, which this engine does not
/// upload
pub const FILE_UPLOAD_PLACEHOLDER: &str = "(file uploads are not supported)";

/// One body fragment captured during the token walk, before it is
/// classified into a body type
#[derive(Debug, Clone, PartialEq, Eq)]
enum DataPart {
    /// From `--form`
    Form(String),
    /// From `-d`/`--data`/`--data-raw`/`--data-binary`/`--data-urlencode`
    Data(String),
}

impl DataPart {
    fn text(&self) -> &str {
        match self {
            DataPart::Form(t) | DataPart::Data(t) => t,
        }
    }
}

/// Parse a curl command into a request template
///
/// Unrecognized flags are silently ignored for forward compatibility.
pub fn parse_curl_command(command: &str) -> Result<Request> {
    let tokens = tokenize(command);

    if tokens.first().map(String::as_str) != Some("curl") {
        return Err(RestpadError::Parse(
            "Command must start with 'curl'.".to_string(),
        ));
    }

    let raw_url = locate_url(&tokens).ok_or_else(|| {
        RestpadError::Parse("Could not find a URL in the command.".to_string())
    })?;

    let mut request = Request::new();
    let (base_url, params) = split_url(&raw_url);
    request.url = base_url;
    request.params = params;

    let mut data_parts: Vec<DataPart> = Vec::new();
    let mut explicit_method = false;
    let mut auth_from_user_flag = false;

    let mut i = 1;
    while i < tokens.len() {
        match tokens[i].as_str() {
            // value already consumed while locating the URL
            "--url" => {
                i += 1;
            }
            "-X" | "--request" => {
                i += 1;
                if i < tokens.len() {
                    request.method = unquote(&tokens[i]).to_uppercase();
                    explicit_method = true;
                }
            }
            "-H" | "--header" => {
                i += 1;
                if i < tokens.len() {
                    if let Some((key, value)) = parse_header(&unquote(&tokens[i])) {
                        request.headers.push(KeyValue::new(key, value));
                    }
                }
            }
            "--form" => {
                i += 1;
                if i < tokens.len() {
                    data_parts.push(DataPart::Form(unquote(&tokens[i])));
                }
            }
            "-d" | "--data" | "--data-raw" | "--data-binary" | "--data-urlencode" => {
                i += 1;
                if i < tokens.len() {
                    data_parts.push(DataPart::Data(unquote(&tokens[i])));
                }
            }
            "-u" | "--user" => {
                i += 1;
                if i < tokens.len() {
                    let credentials = unquote(&tokens[i]);
                    let (username, password) = match credentials.split_once(':') {
                        Some((user, pass)) => (user.to_string(), pass.to_string()),
                        None => (credentials, String::new()),
                    };
                    request.auth = AuthConfig::Basic { username, password };
                    auth_from_user_flag = true;
                }
            }
            "-L" | "--location" => {}
            _ => {}
        }
        i += 1;
    }

    if !explicit_method {
        request.method = method::infer(!data_parts.is_empty()).to_string();
    }

    if !data_parts.is_empty() {
        classify_body(&mut request, &data_parts);
    }

    if !auth_from_user_flag {
        apply_auth_header_fallback(&mut request);
    }

    Ok(request)
}

/// Locate the URL among the tokens
///
/// An explicit `--url VALUE` wins; otherwise the first token that is
/// neither a recognized flag nor the value slot of a value-taking flag.
fn locate_url(tokens: &[String]) -> Option<String> {
    if let Some(pos) = tokens.iter().position(|t| t == "--url") {
        if pos + 1 < tokens.len() {
            let url = unquote(&tokens[pos + 1]);
            if !url.is_empty() {
                return Some(url);
            }
        }
        return None;
    }

    let mut i = 1;
    while i < tokens.len() {
        let token = &tokens[i];
        if VALUE_TAKING_FLAGS.contains(&token.as_str()) {
            i += 2;
            continue;
        }
        if !token.starts_with('-') {
            let url = unquote(token);
            if !url.is_empty() {
                return Some(url);
            }
        }
        i += 1;
    }
    None
}

/// Split a raw URL into its base (scheme through path) and decoded query
/// parameters
///
/// URLs that fail strict parsing (typically because they embed `{{var}}`
/// placeholders) fall back to a textual split on the first `?`.
fn split_url(raw_url: &str) -> (String, Vec<KeyValue>) {
    let candidate = if raw_url.starts_with("http") {
        raw_url.to_string()
    } else {
        format!("http://{}", raw_url)
    };

    // A URL carrying placeholders is split textually; strict parsing would
    // mangle the braces.
    if !raw_url.contains("{{") {
        if let Ok(url) = Url::parse(&candidate) {
            if url.has_host() {
                let params = url
                    .query_pairs()
                    .map(|(key, value)| KeyValue::new(key.into_owned(), value.into_owned()))
                    .collect();
                let base = format!("{}{}", url.origin().ascii_serialization(), url.path());
                return (base, params);
            }
        }
    }

    let (base, query) = match raw_url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (raw_url, None),
    };
    let params = query
        .map(|q| {
            form_urlencoded::parse(q.as_bytes())
                .map(|(key, value)| KeyValue::new(key.into_owned(), value.into_owned()))
                .collect()
        })
        .unwrap_or_default();
    (base.to_string(), params)
}

/// Parse a header string `Name: Value`; returns `None` when the colon is
/// missing
fn parse_header(header: &str) -> Option<(String, String)> {
    let (key, value) = header.split_once(':')?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// Classify accumulated data parts into a body type and fill the
/// corresponding body fields
fn classify_body(request: &mut Request, data_parts: &[DataPart]) {
    let has_form = data_parts.iter().any(|p| matches!(p, DataPart::Form(_)));

    if has_form {
        request.body_type = BodyType::FormData;
        for part in data_parts {
            let (key, value) = match part.text().split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (part.text().to_string(), String::new()),
            };
            if value.starts_with('@') {
                request.form_data.push(KeyValue {
                    key,
                    value: FILE_UPLOAD_PLACEHOLDER.to_string(),
                    enabled: false,
                });
            } else {
                request.form_data.push(KeyValue::new(key, value));
            }
        }
    } else if has_json_content_type(request) {
        request.body_type = BodyType::Raw;
        request.body = data_parts
            .iter()
            .map(DataPart::text)
            .collect::<Vec<_>>()
            .join("&");
    } else {
        request.body_type = BodyType::UrlEncoded;
        for part in data_parts {
            for (key, value) in form_urlencoded::parse(part.text().as_bytes()) {
                request
                    .form_data
                    .push(KeyValue::new(key.into_owned(), value.into_owned()));
            }
        }
    }
}

fn has_json_content_type(request: &Request) -> bool {
    request.headers.iter().any(|h| {
        h.key.eq_ignore_ascii_case("content-type")
            && h.value.to_ascii_lowercase().contains("application/json")
    })
}

/// Derive auth from an explicit `Authorization` header when `-u` was absent
///
/// `Bearer <token>` maps directly; `Basic <base64>` is decoded into
/// credentials. A token that fails to decode leaves auth as `None`.
fn apply_auth_header_fallback(request: &mut Request) {
    let Some(header) = request
        .headers
        .iter()
        .find(|h| h.key.eq_ignore_ascii_case("authorization"))
    else {
        return;
    };

    let Some((scheme, token)) = header.value.split_once(' ') else {
        return;
    };
    let token = token.trim();
    if token.is_empty() {
        return;
    }

    if scheme.eq_ignore_ascii_case("bearer") {
        request.auth = AuthConfig::Bearer {
            token: token.to_string(),
        };
    } else if scheme.eq_ignore_ascii_case("basic") {
        if let Some((username, password)) = auth::decode_basic(token) {
            request.auth = AuthConfig::Basic { username, password };
        }
    }
}
