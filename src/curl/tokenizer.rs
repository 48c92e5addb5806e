//! Shell-aware tokenization of pasted curl commands
//!
//! Splits a command line on unquoted whitespace while treating single- and
//! double-quoted spans as atomic. Quotes are retained in the tokens; a
//! separate [`unquote`] step strips them. Input is user-pasted text that is
//! routinely half-edited, so malformed quoting is tolerated best-effort and
//! nothing here ever errors.

use once_cell::sync::Lazy;
use regex::Regex;

// A backslash-newline (with surrounding whitespace) is a shell line
// continuation; collapsing it first makes a multi-line paste one logical line.
static CONTINUATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\\\r?\n\s*").unwrap());

/// Split a command line into shell-aware tokens, quotes retained
///
/// Single-quoted spans are literal through the next `'`. Inside double
/// quotes a backslash escapes a following `"` or `\`. An unterminated quote
/// runs to the end of input rather than erroring.
pub fn tokenize(line: &str) -> Vec<String> {
    let cleaned = CONTINUATION_RE.replace_all(line, " ");

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quote: Option<char> = None;
    let mut chars = cleaned.trim().chars().peekable();

    while let Some(c) = chars.next() {
        match in_quote {
            Some('\'') => {
                current.push(c);
                if c == '\'' {
                    in_quote = None;
                }
            }
            Some('"') => {
                if c == '\\' && matches!(chars.peek(), Some(&'"') | Some(&'\\')) {
                    current.push(c);
                    current.push(chars.next().unwrap());
                } else {
                    current.push(c);
                    if c == '"' {
                        in_quote = None;
                    }
                }
            }
            _ => {
                if c == '\'' || c == '"' {
                    in_quote = Some(c);
                    current.push(c);
                } else if c.is_whitespace() {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push(c);
                }
            }
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}

/// Strip a single pair of matching outer quotes from a token
///
/// Double-quoted content is unescaped (`\"` -> `"`, `\\` -> `\`);
/// single-quoted content is returned byte-for-byte; anything else is
/// returned unchanged.
pub fn unquote(token: &str) -> String {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        if bytes[0] == b'\'' && bytes[bytes.len() - 1] == b'\'' {
            return token[1..token.len() - 1].to_string();
        }
        if bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
            let inner = &token[1..token.len() - 1];
            let mut out = String::with_capacity(inner.len());
            let mut chars = inner.chars();
            while let Some(c) = chars.next() {
                if c == '\\' {
                    match chars.next() {
                        Some(next @ ('"' | '\\')) => out.push(next),
                        Some(next) => {
                            out.push('\\');
                            out.push(next);
                        }
                        None => out.push('\\'),
                    }
                } else {
                    out.push(c);
                }
            }
            return out;
        }
    }
    token.to_string()
}
