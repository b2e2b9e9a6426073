//! Core types and configuration for Genie.
//!
//! Everything here is provider-agnostic: the message and schema types a
//! caller builds a structured-output request from, the [`config::AppConfig`]
//! the embedding application owns, and a couple of path helpers.

pub mod config;
pub mod types;
pub mod utils;

pub use config::AppConfig;
pub use types::{FunctionSchema, LogContext, Message, NormalizedResult, RequestOptions, Role};
