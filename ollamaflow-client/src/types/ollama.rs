//! Native-dialect API types.

use serde::{Deserialize, Serialize};

/// Status value marking the final record of a model pull.
pub const PULL_SUCCESS_STATUS: &str = "success";

/// Model pull request.
#[derive(Debug, Clone, Serialize)]
pub struct PullModelRequest {
    /// Model name, e.g. `llama3.1` or `llama3.1:70b`.
    pub model: String,
    /// Allow pulling from insecure registries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
    /// Stream progress records. Forced by the call shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

impl PullModelRequest {
    /// Create a pull request for a model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            insecure: None,
            stream: None,
        }
    }
}

/// One progress record of a model pull stream.
#[derive(Debug, Clone, Deserialize)]
pub struct PullProgress {
    /// Progress status, e.g. `pulling manifest`, `verifying sha256 digest`,
    /// or the final `success`.
    pub status: String,
    /// Digest of the layer being pulled.
    pub digest: Option<String>,
    /// Total bytes of the current layer.
    pub total: Option<u64>,
    /// Bytes completed of the current layer.
    pub completed: Option<u64>,
}

impl PullProgress {
    /// Whether this record marks a completed pull.
    pub fn is_success(&self) -> bool {
        self.status == PULL_SUCCESS_STATUS
    }
}

/// Model delete request.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteModelRequest {
    /// Model name to delete.
    pub model: String,
}

impl DeleteModelRequest {
    /// Create a delete request for a model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
        }
    }
}

/// A model installed on a backend.
#[derive(Debug, Clone, Deserialize)]
pub struct LocalModel {
    /// Model name.
    pub name: String,
    /// Model identifier (newer servers repeat the name here).
    pub model: Option<String>,
    /// Last modification time, RFC 3339.
    pub modified_at: Option<String>,
    /// Size on disk in bytes.
    pub size: Option<u64>,
    /// Content digest.
    pub digest: Option<String>,
    /// Model details.
    pub details: Option<ModelDetails>,
}

/// A model currently loaded into memory.
#[derive(Debug, Clone, Deserialize)]
pub struct RunningModel {
    /// Model name.
    pub name: String,
    /// Model identifier.
    pub model: Option<String>,
    /// Size in bytes.
    pub size: Option<u64>,
    /// Content digest.
    pub digest: Option<String>,
    /// When the model will be unloaded, RFC 3339.
    pub expires_at: Option<String>,
    /// VRAM occupied, bytes.
    pub size_vram: Option<u64>,
    /// Model details.
    pub details: Option<ModelDetails>,
}

/// Details shared by model listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelDetails {
    /// Parent model, if derived.
    pub parent_model: Option<String>,
    /// Storage format, e.g. `gguf`.
    pub format: Option<String>,
    /// Model family.
    pub family: Option<String>,
    /// All families the model belongs to.
    pub families: Option<Vec<String>>,
    /// Parameter count label, e.g. `8.0B`.
    pub parameter_size: Option<String>,
    /// Quantization label, e.g. `Q4_0`.
    pub quantization_level: Option<String>,
}

/// Model info request.
#[derive(Debug, Clone, Serialize)]
pub struct ShowModelRequest {
    /// Model name.
    pub model: String,
    /// Include verbose fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
}

impl ShowModelRequest {
    /// Create a show request for a model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            verbose: None,
        }
    }
}

/// Model info response.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    /// The modelfile content.
    pub modelfile: Option<String>,
    /// Runtime parameters.
    pub parameters: Option<String>,
    /// Prompt template.
    pub template: Option<String>,
    /// Model details.
    pub details: Option<ModelDetails>,
    /// Additional backend-specific metadata.
    pub model_info: Option<serde_json::Value>,
    /// Declared capabilities.
    pub capabilities: Option<Vec<String>>,
}

/// Embeddings request.
#[derive(Debug, Clone, Serialize)]
pub struct EmbeddingsRequest {
    /// Model name.
    pub model: String,
    /// Input text(s) to embed.
    pub input: EmbeddingsInput,
    /// Truncate inputs to the context window instead of erroring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncate: Option<bool>,
    /// Model options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

impl EmbeddingsRequest {
    /// Embed a single text.
    pub fn new(model: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: EmbeddingsInput::Single(input.into()),
            truncate: None,
            options: None,
        }
    }

    /// Embed a batch of texts.
    pub fn batch(model: impl Into<String>, inputs: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input: EmbeddingsInput::Batch(inputs),
            truncate: None,
            options: None,
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
    /// Model that produced the embeddings.
    pub model: Option<String>,
    /// One embedding vector per input.
    pub embeddings: Vec<Vec<f64>>,
    /// Total wall time, nanoseconds.
    pub total_duration: Option<u64>,
    /// Model load time, nanoseconds.
    pub load_duration: Option<u64>,
    /// Tokens evaluated from the prompt.
    pub prompt_eval_count: Option<u32>,
}

/// Completion (generate) request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    /// Model name.
    pub model: String,
    /// Prompt text.
    pub prompt: String,
    /// System prompt override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Prompt template override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Context tokens from a previous turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Vec<i64>>,
    /// Stream the response. Forced by the call shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Bypass templating and send the prompt raw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<bool>,
    /// Response format (`json` for JSON mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Model options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    /// Keep-alive duration, e.g. `10m`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<String>,
}

impl GenerateRequest {
    /// Create a generate request.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            template: None,
            context: None,
            stream: None,
            raw: None,
            format: None,
            options: None,
            keep_alive: None,
        }
    }
}

/// Completion (generate) response. In streaming mode every record has this
/// shape: intermediate records carry a `response` fragment with
/// `done == false`, the final record has `done == true` plus timing counters.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Model name.
    pub model: Option<String>,
    /// Creation time, RFC 3339.
    pub created_at: Option<String>,
    /// Response text (a fragment in streaming mode).
    #[serde(default)]
    pub response: String,
    /// Whether generation is done.
    #[serde(default)]
    pub done: bool,
    /// Reason generation finished.
    pub done_reason: Option<String>,
    /// Context tokens usable for a follow-up turn.
    pub context: Option<Vec<i64>>,
    /// Total wall time, nanoseconds.
    pub total_duration: Option<u64>,
    /// Model load time, nanoseconds.
    pub load_duration: Option<u64>,
    /// Tokens evaluated from the prompt.
    pub prompt_eval_count: Option<u32>,
    /// Prompt evaluation time, nanoseconds.
    pub prompt_eval_duration: Option<u64>,
    /// Tokens generated.
    pub eval_count: Option<u32>,
    /// Generation time, nanoseconds.
    pub eval_duration: Option<u64>,
}

/// Chat request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name.
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
    /// Stream the response. Forced by the call shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    /// Response format (`json` for JSON mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Model options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
    /// Keep-alive duration, e.g. `10m`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<String>,
}

impl ChatRequest {
    /// Create a chat request.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: None,
            format: None,
            options: None,
            keep_alive: None,
        }
    }
}

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: `system`, `user`, or `assistant`.
    pub role: String,
    /// Message content.
    pub content: String,
    /// Images, base64 encoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

impl ChatMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
            images: None,
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
            images: None,
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            images: None,
        }
    }
}

/// Chat response. In streaming mode every record has this shape:
/// intermediate records carry a `message` fragment with `done == false`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Model name.
    pub model: Option<String>,
    /// Creation time, RFC 3339.
    pub created_at: Option<String>,
    /// Response message (a fragment in streaming mode).
    pub message: Option<ChatMessage>,
    /// Whether generation is done.
    #[serde(default)]
    pub done: bool,
    /// Reason generation finished.
    pub done_reason: Option<String>,
    /// Total wall time, nanoseconds.
    pub total_duration: Option<u64>,
    /// Model load time, nanoseconds.
    pub load_duration: Option<u64>,
    /// Tokens evaluated from the prompt.
    pub prompt_eval_count: Option<u32>,
    /// Prompt evaluation time, nanoseconds.
    pub prompt_eval_duration: Option<u64>,
    /// Tokens generated.
    pub eval_count: Option<u32>,
    /// Generation time, nanoseconds.
    pub eval_duration: Option<u64>,
}

/// Model options.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Options {
    /// Temperature.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Top P.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Top K.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    /// Number of tokens to predict.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<i32>,
    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Random seed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Number of context tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_ctx: Option<i32>,
    /// Repeat penalty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_penalty: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_progress_success() {
        let progress: PullProgress =
            serde_json::from_str("{\"status\":\"success\"}").unwrap();
        assert!(progress.is_success());

        let progress: PullProgress =
            serde_json::from_str("{\"status\":\"pulling manifest\"}").unwrap();
        assert!(!progress.is_success());
    }

    #[test]
    fn test_pull_progress_sentinel_is_case_sensitive() {
        let progress: PullProgress =
            serde_json::from_str("{\"status\":\"Success\"}").unwrap();
        assert!(!progress.is_success());
    }

    #[test]
    fn test_chat_message_constructors() {
        assert_eq!(ChatMessage::system("s").role, "system");
        assert_eq!(ChatMessage::user("u").role, "user");
        assert_eq!(ChatMessage::assistant("a").role, "assistant");
    }

    #[test]
    fn test_request_skips_unset_options() {
        let request = PullModelRequest::new("llama3.1");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, "{\"model\":\"llama3.1\"}");
    }

    #[test]
    fn test_streaming_chat_record_decodes() {
        let line = "{\"model\":\"llama3.1\",\"created_at\":\"2025-01-01T00:00:00Z\",\
                    \"message\":{\"role\":\"assistant\",\"content\":\"Hel\"},\"done\":false}";
        let record: ChatResponse = serde_json::from_str(line).unwrap();
        assert!(!record.done);
        assert_eq!(record.message.unwrap().content, "Hel");
    }

    #[test]
    fn test_final_generate_record_decodes() {
        let line = "{\"model\":\"llama3.1\",\"response\":\"\",\"done\":true,\
                    \"done_reason\":\"stop\",\"eval_count\":42}";
        let record: GenerateResponse = serde_json::from_str(line).unwrap();
        assert!(record.done);
        assert_eq!(record.eval_count, Some(42));
    }

    #[test]
    fn test_embeddings_input_shapes() {
        let single = EmbeddingsRequest::new("nomic-embed-text", "hello");
        let json = serde_json::to_value(&single).unwrap();
        assert!(json["input"].is_string());

        let batch =
            EmbeddingsRequest::batch("nomic-embed-text", vec!["a".to_string(), "b".to_string()]);
        let json = serde_json::to_value(&batch).unwrap();
        assert!(json["input"].is_array());
    }
}
