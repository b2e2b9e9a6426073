//! Provider capability trait — the contract every LLM backend implements.
//!
//! The dispatcher resolves the request, picks an implementation from the
//! [`crate::registry::ProviderRegistry`], and hands the wire call to it.

use async_trait::async_trait;
use genie_core::{FunctionSchema, Message};

use crate::error::Result;
use crate::resolver::ResolvedRequest;

/// A vendor backend able to answer a structured-output request.
#[async_trait]
pub trait ProviderCapability: Send + Sync {
    /// Perform one structured-output call.
    ///
    /// # Returns
    /// * `Ok(Some(body))` — the provider's parsed JSON response.
    /// * `Ok(None)` — the provider answered successfully with an empty body.
    /// * `Err(_)` — a transport failure (non-success status, unparseable body,
    ///   connection error). Implementations must not retry.
    async fn function_calling(
        &self,
        messages: &[Message],
        function: &FunctionSchema,
        request: &ResolvedRequest,
    ) -> Result<Option<serde_json::Value>>;

    /// Display name for logging.
    fn name(&self) -> &str;
}
