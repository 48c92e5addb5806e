//! HTTP method constants and utilities
//!
//! Methods are carried as uppercase strings throughout the engine; these
//! helpers centralize the few places where method semantics matter.

/// HTTP GET method
pub const GET: &str = "GET";

/// HTTP POST method
pub const POST: &str = "POST";

/// HTTP PUT method
pub const PUT: &str = "PUT";

/// HTTP PATCH method
pub const PATCH: &str = "PATCH";

/// HTTP DELETE method
pub const DELETE: &str = "DELETE";

/// HTTP HEAD method
pub const HEAD: &str = "HEAD";

/// HTTP OPTIONS method
pub const OPTIONS: &str = "OPTIONS";

/// All methods the editing surface offers
pub const STANDARD_METHODS: &[&str] = &[GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS];

/// Check if a string is a standard HTTP method
pub fn is_standard(method: &str) -> bool {
    STANDARD_METHODS.iter().any(|&m| m.eq_ignore_ascii_case(method))
}

/// Infer the method for an imported command based on whether it carries data
pub fn infer(has_data: bool) -> &'static str {
    if has_data {
        POST
    } else {
        GET
    }
}

/// Whether a request with this method carries a body on the wire
///
/// GET and HEAD requests never do; everything else may.
pub fn supports_body(method: &str) -> bool {
    !method.eq_ignore_ascii_case(GET) && !method.eq_ignore_ascii_case(HEAD)
}
