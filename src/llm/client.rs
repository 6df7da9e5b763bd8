use super::error::ProviderError;

/// Single-turn text completion
///
/// Implementations do not retry; repair and retry policy belongs to the caller.
pub trait CompletionClient: Send + Sync {
    /// Sends `prompt` and returns the reply text, whitespace-trimmed
    fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    fn name(&self) -> &str;

    fn model_info(&self) -> Option<String> {
        None
    }
}
