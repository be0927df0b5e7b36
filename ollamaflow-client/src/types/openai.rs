//! OpenAI-compatible dialect API types.

use serde::{Deserialize, Serialize};

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model to use.
    pub model: String,
    /// Messages in the conversation.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// User identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Whether to stream the response. Forced by the call shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl ChatCompletionRequest {
    /// Create a new request.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            top_p: None,
            max_tokens: None,
            stop: None,
            seed: None,
            user: None,
            stream: None,
        }
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message author.
    pub role: String,
    /// Message content.
    pub content: Option<String>,
    /// Name of the author.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: Some(content.into()),
            name: None,
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: Some(content.into()),
            name: None,
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: Some(content.into()),
            name: None,
        }
    }
}

/// Chat completion response (non-streaming).
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion identifier.
    pub id: Option<String>,
    /// Object type, `chat.completion`.
    pub object: Option<String>,
    /// Creation time, unix seconds.
    pub created: Option<u64>,
    /// Model that answered.
    pub model: Option<String>,
    /// Completion choices.
    pub choices: Vec<ChatChoice>,
    /// Token usage.
    pub usage: Option<Usage>,
}

/// One choice of a chat completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Choice index.
    pub index: Option<u32>,
    /// The full message.
    pub message: ChatMessage,
    /// Why generation stopped.
    pub finish_reason: Option<String>,
}

/// One streamed chunk of a chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    /// Completion identifier.
    pub id: Option<String>,
    /// Object type, `chat.completion.chunk`.
    pub object: Option<String>,
    /// Creation time, unix seconds.
    pub created: Option<u64>,
    /// Model that answered.
    pub model: Option<String>,
    /// Delta choices.
    #[serde(default)]
    pub choices: Vec<ChatChunkChoice>,
}

impl ChatCompletionChunk {
    /// Whether any choice carries a finish reason, ending the stream.
    pub fn is_complete(&self) -> bool {
        self.choices
            .iter()
            .any(|choice| choice.finish_reason.is_some())
    }
}

/// One delta choice of a streamed chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChunkChoice {
    /// Choice index.
    pub index: Option<u32>,
    /// The incremental delta.
    #[serde(default)]
    pub delta: ChatDelta,
    /// Why generation stopped; set on the final chunk.
    pub finish_reason: Option<String>,
}

/// Incremental content of one streamed choice.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatDelta {
    /// Role, present on the first chunk.
    pub role: Option<String>,
    /// Content fragment.
    pub content: Option<String>,
}

/// Text completion request.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    /// Model to use.
    pub model: String,
    /// Prompt text.
    pub prompt: String,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,
    /// Sampling temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Whether to stream the response. Forced by the call shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl CompletionRequest {
    /// Create a new request.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
            stop: None,
            stream: None,
        }
    }
}

/// Text completion response. Streamed chunks reuse this shape with partial
/// `text` and a `finish_reason` on the last chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    /// Completion identifier.
    pub id: Option<String>,
    /// Object type, `text_completion`.
    pub object: Option<String>,
    /// Creation time, unix seconds.
    pub created: Option<u64>,
    /// Model that answered.
    pub model: Option<String>,
    /// Completion choices.
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
    /// Token usage.
    pub usage: Option<Usage>,
}

impl CompletionResponse {
    /// Whether any choice carries a finish reason, ending the stream.
    pub fn is_complete(&self) -> bool {
        self.choices
            .iter()
            .any(|choice| choice.finish_reason.is_some())
    }
}

/// One choice of a text completion.
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionChoice {
    /// Generated text (a fragment in streaming mode).
    #[serde(default)]
    pub text: String,
    /// Choice index.
    pub index: Option<u32>,
    /// Why generation stopped.
    pub finish_reason: Option<String>,
}

/// Embeddings request.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingsRequest {
    /// Model to use.
    pub model: String,
    /// Input text(s) to embed.
    pub input: EmbeddingsInput,
    /// User identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl EmbeddingsRequest {
    /// Embed a single text.
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: EmbeddingsInput::Single(input.into()),
            user: None,
        }
    }
}

/// One text or a batch of texts.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EmbeddingsInput {
    /// A single input text.
    Single(String),
    /// A batch of input texts.
    Batch(Vec<String>),
}

/// Embeddings response.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingsResponse {
    /// Object type, `list`.
    pub object: Option<String>,
    /// One embedding per input.
    pub data: Vec<EmbeddingObject>,
    /// Model that produced the embeddings.
    pub model: Option<String>,
    /// Token usage.
    pub usage: Option<Usage>,
}

/// One embedding of an embeddings response.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingObject {
    /// Object type, `embedding`.
    pub object: Option<String>,
    /// The embedding vector.
    pub embedding: Vec<f64>,
    /// Input index this embedding belongs to.
    pub index: Option<u32>,
}

/// Token usage counters.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt.
    pub prompt_tokens: Option<u64>,
    /// Tokens in the completion.
    pub completion_tokens: Option<u64>,
    /// Total tokens.
    pub total_tokens: Option<u64>,
}
