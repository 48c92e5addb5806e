//! Request materialization
//!
//! Turns a request template plus an environment into a transport-ready
//! request: final merged URL, resolved headers, synthesized auth, resolved
//! body.

pub mod materialize;

pub use materialize::{materialize, resolve_url};
