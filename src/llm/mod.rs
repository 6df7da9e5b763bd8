//! Text-generation client abstraction layer
//!
//! [`CompletionClient`] is the seam between the scaffold planner and a concrete backend:
//! [`ProviderClient`] talks to one of the hosted chat-completion providers, while
//! [`MockCompletionClient`] replays queued replies in tests.

mod chat;
mod client;
mod error;
mod mock;
mod provider;
mod types;

pub use chat::{ProviderClient, SAMPLING_TEMPERATURE};
pub use client::CompletionClient;
pub use error::ProviderError;
pub use mock::{MockCompletionClient, MockReply};
pub use provider::Provider;
pub use types::{ChatMessage, ChatRequest, MessageRole};
