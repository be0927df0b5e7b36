//! # ollamaflow-client
//!
//! Client SDK for OllamaFlow-compatible gateways: model servers fronted by
//! a load balancer that speak the native NDJSON dialect under `/api/…` and
//! the OpenAI-compatible event-stream dialect under `/v1/…`.
//!
//! Materializing calls return one aggregate value (or an empty/absent
//! result on a non-2xx status); streaming calls return a lazy
//! [`FlowStream`] of typed records decoded as chunks arrive, built on
//! [`ollamaflow_streaming`].
//!
//! ## Example
//!
//! ```ignore
//! use futures::StreamExt;
//! use ollamaflow_client::types::ollama::{ChatMessage, ChatRequest, PullModelRequest};
//! use ollamaflow_client::OllamaFlowClient;
//!
//! let client = OllamaFlowClient::new("http://localhost:43411");
//!
//! // Pull a model, printing progress until the success sentinel.
//! let mut pull = client.ollama().pull_model(PullModelRequest::new("llama3.1")).await?;
//! while let Some(progress) = pull.next().await {
//!     println!("{}", progress?.status);
//! }
//!
//! // Stream a chat reply token by token.
//! let request = ChatRequest::new("llama3.1", vec![ChatMessage::user("Hello!")]);
//! let mut chat = client.ollama().chat_stream(request).await?;
//! while let Some(record) = chat.next().await {
//!     if let Some(message) = record?.message {
//!         print!("{}", message.content);
//!     }
//! }
//! # Ok::<(), ollamaflow_client::ClientError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod ollama;
pub mod openai;
pub mod types;

// Re-exports
pub use client::{FlowStream, OllamaFlowClient};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use ollama::OllamaApi;
pub use openai::OpenAiApi;

// The streaming machinery, for callers that attach cancellation tokens or
// observers, or that match on pump states and stream errors.
pub use ollamaflow_streaming as streaming;
pub use ollamaflow_streaming::{LineTransform, PumpState, StreamError, StreamObserver};
