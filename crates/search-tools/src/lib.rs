//! Shared API-search tool runtime.
//!
//! This crate is intended to be used by:
//! - `apisearch-mcp` (the stdio MCP adapter binary)
//!
//! It contains the identifier formatter, the upstream HTTP client, and the
//! MCP tool surface (registry + call dispatch). It intentionally contains
//! **no** transport or process-bootstrap logic.

pub mod config;
pub mod error;
pub mod ident;
pub mod runtime;
pub mod upstream;
