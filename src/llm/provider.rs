use std::fmt;
use std::str::FromStr;

/// Supported text-generation backends
///
/// All of them expose an OpenAI-style chat-completions endpoint and authenticate with a
/// bearer token read from a provider-specific variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Groq,
    Together,
    HuggingFace,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::Groq, Provider::Together, Provider::HuggingFace];

    /// Name used in `LLM_PROVIDER`
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::Together => "together",
            Provider::HuggingFace => "hf",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Provider::Groq => "https://api.groq.com/openai/v1/chat/completions",
            Provider::Together => "https://api.together.xyz/v1/chat/completions",
            Provider::HuggingFace => "https://api-inference.huggingface.co/v1/chat/completions",
        }
    }

    /// Environment variable holding this provider's credential
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Provider::Groq => "GROQ_API_KEY",
            Provider::Together => "TOGETHER_API_KEY",
            Provider::HuggingFace => "HF_API_KEY",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(Provider::Groq),
            "together" => Ok(Provider::Together),
            "hf" | "huggingface" => Ok(Provider::HuggingFace),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
