//! Template request -> transport-ready request
//!
//! The materializer is the single authority for reconciling the query
//! string embedded in the URL with the separate params list: params rows
//! win on key collision. It produces a fresh [`MaterializedRequest`] per
//! send; nothing is cached across calls.

use url::form_urlencoded;

use crate::auth;
use crate::http::method;
use crate::models::{BodyType, Environment, KeyValue, MaterializedRequest, Request};
use crate::vars;

/// Materialize a request template against an environment
///
/// Pure and deterministic: identical inputs yield byte-identical output.
pub fn materialize(request: &Request, environment: &Environment) -> MaterializedRequest {
    let url = resolve_url(&request.url, &request.params, environment);

    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .filter(|h| h.enabled && !h.key.is_empty())
        .map(|h| (h.key.clone(), vars::substitute_str(&h.value, environment)))
        .collect();

    // An explicit Authorization header always wins over the auth config
    let resolved_auth = auth::resolve(&request.auth, environment);
    if let Some(value) = auth::auth_header(&resolved_auth) {
        if !headers
            .iter()
            .any(|(key, _)| key.eq_ignore_ascii_case("authorization"))
        {
            headers.push(("Authorization".to_string(), value));
        }
    }

    let body = if method::supports_body(&request.method) {
        resolve_body(request, environment)
    } else {
        None
    };

    MaterializedRequest {
        method: request.method.clone(),
        url,
        headers,
        body,
    }
}

/// Resolve a templated URL and merge its query string with the params list
///
/// Pairs already in the URL keep their position (values substituted);
/// enabled params rows overlay them with set-not-append semantics, so a
/// params row wins over a same-key pair in the URL. Exposed for the
/// exporter and for URL previews in the editing surface.
pub fn resolve_url(url: &str, params: &[KeyValue], environment: &Environment) -> String {
    let (base, query) = match url.split_once('?') {
        Some((base, query)) => (base, Some(query)),
        None => (url, None),
    };
    let base = vars::substitute_str(base, environment);

    let mut pairs: Vec<(String, String)> = Vec::new();
    if let Some(query) = query {
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            pairs.push((key.into_owned(), vars::substitute_str(&value, environment)));
        }
    }
    for param in params.iter().filter(|p| p.enabled && !p.key.is_empty()) {
        set_pair(&mut pairs, &param.key, vars::substitute_str(&param.value, environment));
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    let merged = serializer.finish();

    if merged.is_empty() {
        base
    } else {
        format!("{}?{}", base, merged)
    }
}

/// Replace the first occurrence of `key`, drop later duplicates, append if
/// absent
fn set_pair(pairs: &mut Vec<(String, String)>, key: &str, value: String) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value;
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = index <= first || k != key;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value)),
    }
}

/// Resolve the wire body according to the request's body type
///
/// Form entries (both kinds) become percent-encoded `key=value` pairs;
/// multipart file content is out of scope, so text fields are all there is
/// to encode. Returns `None` when the resolved body is empty.
fn resolve_body(request: &Request, environment: &Environment) -> Option<String> {
    let body = match request.body_type {
        BodyType::Raw => vars::substitute_str(&request.body, environment),
        BodyType::FormData | BodyType::UrlEncoded => {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for entry in request
                .form_data
                .iter()
                .filter(|e| e.enabled && !e.key.is_empty())
            {
                serializer.append_pair(&entry.key, &vars::substitute_str(&entry.value, environment));
            }
            serializer.finish()
        }
    };
    if body.is_empty() {
        None
    } else {
        Some(body)
    }
}
