//! Structured-output dispatch for Genie.
//!
//! # Architecture
//!
//! - [`requester::Requester`] — entry point: resolve, dispatch, normalize
//! - [`resolver`] — picks model, provider, API key and headers for a call
//! - [`registry`] — provider id → [`traits::ProviderCapability`] implementation
//! - [`openai::OpenAiProvider`] — OpenAI-compatible `/chat/completions` client
//! - [`normalizer`] — extracts the JSON answer and drops sentinel values
//! - [`observability`] — sink receiving one record per completed call
//! - [`error`] — configuration and transport failures

pub mod error;
pub mod normalizer;
pub mod observability;
pub mod openai;
pub mod registry;
pub mod requester;
pub mod resolver;
pub mod traits;

pub use error::{GenieError, TransportError};
pub use normalizer::{Answer, MissingReason, INVALID_VALUES};
pub use observability::{LlmCallRecord, MemorySink, ObservabilitySink, TracingSink};
pub use openai::OpenAiProvider;
pub use registry::{ProviderKind, ProviderRegistry};
pub use requester::Requester;
pub use resolver::ResolvedRequest;
pub use traits::ProviderCapability;
