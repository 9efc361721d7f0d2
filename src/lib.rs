//! Sequential fulfillment identifiers.
//!
//! [`IdentifierResponseBuilder`] issues `Response { status: "success",
//! identifier }` values whose identifiers are the counter zero-padded to ten
//! digits, starting at `0000100000`. The binary wraps it with config,
//! logging and a stdout sink.

pub mod config;
pub mod id;
pub mod logger;
pub mod service;
pub mod shutdown;
pub mod sinks;
pub mod types;

pub use config::{AppConfig, OverflowPolicy};
pub use id::{IdentifierResponseBuilder, SharedIdentifierBuilder, format_identifier};
pub use types::{OutputFormat, Response, STATUS_SUCCESS};
