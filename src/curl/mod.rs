//! cURL interoperability
//!
//! Round-trips requests through shell `curl` syntax:
//!
//! - **Import**: paste a curl command, get a request template back. Shell
//!   quoting, line continuations, body-type inference and auth extraction
//!   are handled; unknown flags are ignored for forward compatibility.
//! - **Export**: serialize a request template (with its environment
//!   applied) into a shell-safe curl command for sharing.
//!
//! The two directions are designed to round-trip: reparsing an exported
//! command reproduces the request the materializer would send.

pub mod export;
pub mod import;
pub mod tokenizer;

pub use export::{generate_curl_command, shell_escape};
pub use import::parse_curl_command;
pub use tokenizer::{tokenize, unquote};
