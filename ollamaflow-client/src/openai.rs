//! OpenAI-compatible API methods.
//!
//! Streaming endpoints of this dialect prefix every payload line with
//! `data:`; the prefix is stripped before decoding and the terminating
//! `data: [DONE]` sentinel is not JSON, so it is skipped like any other
//! non-record line. Streams stop early on the first chunk carrying a
//! `finish_reason`.

use crate::client::{FlowStream, OllamaFlowClient};
use crate::error::ClientResult;
use crate::types::openai::{
    ChatCompletionChunk, ChatCompletionRequest, ChatCompletionResponse, CompletionRequest,
    CompletionResponse, EmbeddingsRequest, EmbeddingsResponse,
};
use ollamaflow_streaming::LineTransform;

/// OpenAI-compatible methods, obtained from
/// [`OllamaFlowClient::openai`](crate::OllamaFlowClient::openai).
#[derive(Debug, Clone, Copy)]
pub struct OpenAiApi<'a> {
    client: &'a OllamaFlowClient,
}

impl<'a> OpenAiApi<'a> {
    pub(crate) fn new(client: &'a OllamaFlowClient) -> Self {
        Self { client }
    }

    /// Run a text completion, fully materialized.
    pub async fn completions(
        &self,
        mut request: CompletionRequest,
    ) -> ClientResult<Option<CompletionResponse>> {
        request.stream = Some(false);
        self.client.post_json("/v1/completions", &request).await
    }

    /// Run a text completion as a stream of chunks.
    pub async fn completion_stream(
        &self,
        mut request: CompletionRequest,
    ) -> ClientResult<FlowStream<CompletionResponse>> {
        request.stream = Some(true);
        let stream = self
            .client
            .post_stream("/v1/completions", &request, LineTransform::sse_data())
            .await?;
        Ok(stream.with_stop(CompletionResponse::is_complete))
    }

    /// Run a chat completion, fully materialized.
    pub async fn chat_completions(
        &self,
        mut request: ChatCompletionRequest,
    ) -> ClientResult<Option<ChatCompletionResponse>> {
        request.stream = Some(false);
        self.client
            .post_json("/v1/chat/completions", &request)
            .await
    }

    /// Run a chat completion as a stream of delta chunks.
    pub async fn chat_completion_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> ClientResult<FlowStream<ChatCompletionChunk>> {
        request.stream = Some(true);
        let stream = self
            .client
            .post_stream("/v1/chat/completions", &request, LineTransform::sse_data())
            .await?;
        Ok(stream.with_stop(ChatCompletionChunk::is_complete))
    }

    /// Generate embeddings.
    pub async fn embeddings(
        &self,
        request: EmbeddingsRequest,
    ) -> ClientResult<Option<EmbeddingsResponse>> {
        self.client.post_json("/v1/embeddings", &request).await
    }
}
