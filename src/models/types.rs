//! Core data types
//!
//! This module defines the primary data structures used throughout the engine.
//! These types are exactly what the persistence collaborator serializes -
//! there is no separate storage encoding.
//!
//! # Why plain `Vec` rows instead of maps?
//!
//! Query params, headers and form fields are kept as ordered lists of
//! [`KeyValue`] rows rather than maps because the editing surface allows
//! duplicate and temporarily-empty keys, and users expect their row order
//! to survive a save/load cycle.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::http::method;

// =============================================================================
// KEY/VALUE ROWS
// =============================================================================

/// One row of a key/value editor (query params, headers, form data)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl KeyValue {
    /// Create an enabled row
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

// =============================================================================
// VARIABLES
// =============================================================================

/// Declared type of an environment variable
///
/// The stored value is always text; the type governs how the caster
/// interprets it at substitution time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableType {
    #[default]
    Auto,
    String,
    Number,
    Boolean,
    #[serde(rename = "JSON")]
    Json,
}

/// A typed environment variable
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, rename = "type")]
    pub kind: VariableType,
}

impl Variable {
    /// Create an enabled variable with the given type
    pub fn new(key: impl Into<String>, value: impl Into<String>, kind: VariableType) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
            kind,
        }
    }
}

/// The named set of variables available for substitution
///
/// Order is irrelevant to resolution (lookup takes the first enabled match)
/// but preserved for display.
pub type Environment = Vec<Variable>;

// =============================================================================
// AUTHENTICATION
// =============================================================================

/// Request authentication configuration
///
/// Exactly one variant is active at a time; consumers match exhaustively so
/// an unknown variant is a compile-time impossibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
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
}

// =============================================================================
// BODY
// =============================================================================

/// Which body representation of a [`Request`] is authoritative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyType {
    /// Opaque body string (`Request::body`)
    #[default]
    #[serde(rename = "raw")]
    Raw,
    /// Ordered form entries (`Request::form_data`), multipart-style
    #[serde(rename = "form-data")]
    FormData,
    /// Ordered form entries (`Request::form_data`), URL-encoded
    #[serde(rename = "x-www-form-urlencoded")]
    UrlEncoded,
}

// =============================================================================
// REQUEST TEMPLATE
// =============================================================================

/// A request template as authored in the editor
///
/// Textual fields may embed `{{variable}}` placeholders; the URL may embed a
/// literal query string. `params` is a denormalized view of that query
/// string - the materializer reconciles the two at send time (params list
/// wins on key collisions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Stable identity for history and collections; never sent on the wire
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub params: Vec<KeyValue>,
    #[serde(default)]
    pub headers: Vec<KeyValue>,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub body: String,
    #[serde(default, rename = "bodyType")]
    pub body_type: BodyType,
    #[serde(default, rename = "formData")]
    pub form_data: Vec<KeyValue>,
}

impl Request {
    /// Create an empty GET template with a fresh id
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: None,
            method: method::GET.to_string(),
            url: String::new(),
            params: Vec::new(),
            headers: Vec::new(),
            auth: AuthConfig::None,
            body: String::new(),
            body_type: BodyType::Raw,
            form_data: Vec::new(),
        }
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// MATERIALIZED REQUEST
// =============================================================================

/// A fully resolved request, ready for the transport collaborator
///
/// No placeholders remain; `url` carries the final merged query string;
/// `headers` is a flat ordered list including any synthesized
/// `Authorization` header; `body` is the literal wire payload (absent for
/// bodyless methods). Produced fresh per send and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Coarse response classification used by the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Html,
    Xml,
    Text,
    Image,
    Binary,
}

impl ResponseKind {
    /// Classify a response by its Content-Type
    pub fn classify(content_type: Option<&str>) -> Self {
        let Some(raw) = content_type else {
            return ResponseKind::Text;
        };
        let Ok(mime) = raw.parse::<mime::Mime>() else {
            return ResponseKind::Text;
        };

        if mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON) {
            ResponseKind::Json
        } else if mime.type_() == mime::IMAGE {
            ResponseKind::Image
        } else if mime.subtype() == mime::HTML {
            ResponseKind::Html
        } else if mime.subtype() == mime::XML || mime.suffix() == Some(mime::XML) {
            ResponseKind::Xml
        } else if mime.type_() == mime::TEXT {
            ResponseKind::Text
        } else {
            ResponseKind::Binary
        }
    }
}

/// HTTP response data returned by the transport collaborator
#[derive(Debug, Clone)]
pub struct ResponseData {
    /// HTTP status code
    pub status: u16,
    /// Status reason phrase
    pub status_text: String,
    /// Response headers (last value wins for repeated names)
    pub headers: IndexMap<String, String>,
    /// Raw response body
    pub body: Vec<u8>,
    /// Content-Type header, if any
    pub content_type: Option<String>,
    /// Wall-clock request duration
    pub elapsed: Duration,
    /// Classification for the rendering surface
    pub kind: ResponseKind,
}

impl ResponseData {
    /// Response body decoded as UTF-8 (lossy)
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
