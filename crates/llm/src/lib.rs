//! Text-completion gateway for outfitter.
//!
//! The engine builds a prompt, hands it to a [`CompletionGateway`], and parses
//! whatever text comes back. Gateways do not retry; timeout policy lives in
//! [`AdapterConfig`].

mod anthropic;
mod config;
mod error;

pub use anthropic::{extract_anthropic_text, AnthropicGateway};
pub use config::AdapterConfig;
pub use error::GatewayError;

use async_trait::async_trait;

/// A fallible, asynchronous prompt-in, text-out call.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}
