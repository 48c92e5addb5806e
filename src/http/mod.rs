//! HTTP protocol constants and utilities

pub mod method;
