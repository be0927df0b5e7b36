//! Native-dialect API methods.
//!
//! Streaming endpoints of this dialect answer with bare JSON objects, one
//! per line. Model pulls end on the `success` status sentinel; generate and
//! chat streams end on the record whose `done` flag is set. Both fire before
//! the transport itself closes, so the streams stop early instead of
//! draining a connection the gateway may keep open.

use crate::client::{FlowStream, OllamaFlowClient};
use crate::error::ClientResult;
use crate::types::ollama::{
    ChatRequest, ChatResponse, DeleteModelRequest, EmbeddingsRequest, EmbeddingsResponse,
    GenerateRequest, GenerateResponse, LocalModel, ModelInfo, PullModelRequest, PullProgress,
    RunningModel, ShowModelRequest,
};
use ollamaflow_streaming::{LineTransform, MODEL_ENVELOPE_KEYS};

/// Native-dialect methods, obtained from
/// [`OllamaFlowClient::ollama`](crate::OllamaFlowClient::ollama).
#[derive(Debug, Clone, Copy)]
pub struct OllamaApi<'a> {
    client: &'a OllamaFlowClient,
}

impl<'a> OllamaApi<'a> {
    pub(crate) fn new(client: &'a OllamaFlowClient) -> Self {
        Self { client }
    }

    /// Pull a model, yielding progress records as the gateway downloads it.
    ///
    /// The stream stops on the record whose status is the `success`
    /// sentinel (exact match), without waiting for the transport to close.
    pub async fn pull_model(
        &self,
        mut request: PullModelRequest,
    ) -> ClientResult<FlowStream<PullProgress>> {
        request.stream = Some(true);
        let stream = self
            .client
            .post_stream("/api/pull", &request, LineTransform::Identity)
            .await?;
        Ok(stream.with_stop(PullProgress::is_success))
    }

    /// Delete a model.
    pub async fn delete_model(
        &self,
        request: DeleteModelRequest,
    ) -> ClientResult<Option<serde_json::Value>> {
        self.client.delete_json("/api/delete", &request).await
    }

    /// List models installed on the gateway's backends.
    pub async fn list_local_models(&self) -> ClientResult<Vec<LocalModel>> {
        self.client.get_list("/api/tags", MODEL_ENVELOPE_KEYS).await
    }

    /// List models currently loaded into memory.
    pub async fn list_running_models(&self) -> ClientResult<Vec<RunningModel>> {
        self.client.get_list("/api/ps", MODEL_ENVELOPE_KEYS).await
    }

    /// Show details for one model.
    pub async fn show_model_info(
        &self,
        request: ShowModelRequest,
    ) -> ClientResult<Option<ModelInfo>> {
        self.client.post_json("/api/show", &request).await
    }

    /// Generate embeddings.
    pub async fn generate_embeddings(
        &self,
        request: EmbeddingsRequest,
    ) -> ClientResult<Option<EmbeddingsResponse>> {
        self.client.post_json("/api/embed", &request).await
    }

    /// Generate a completion, fully materialized.
    pub async fn generate(
        &self,
        mut request: GenerateRequest,
    ) -> ClientResult<Option<GenerateResponse>> {
        request.stream = Some(false);
        self.client.post_json("/api/generate", &request).await
    }

    /// Generate a completion as a stream of response fragments.
    pub async fn generate_stream(
        &self,
        mut request: GenerateRequest,
    ) -> ClientResult<FlowStream<GenerateResponse>> {
        request.stream = Some(true);
        let stream = self
            .client
            .post_stream("/api/generate", &request, LineTransform::Identity)
            .await?;
        Ok(stream.with_stop(|record: &GenerateResponse| record.done))
    }

    /// Run a chat turn, fully materialized.
    pub async fn chat(&self, mut request: ChatRequest) -> ClientResult<Option<ChatResponse>> {
        request.stream = Some(false);
        self.client.post_json("/api/chat", &request).await
    }

    /// Run a chat turn as a stream of message fragments.
    pub async fn chat_stream(
        &self,
        mut request: ChatRequest,
    ) -> ClientResult<FlowStream<ChatResponse>> {
        request.stream = Some(true);
        let stream = self
            .client
            .post_stream("/api/chat", &request, LineTransform::Identity)
            .await?;
        Ok(stream.with_stop(|record: &ChatResponse| record.done))
    }
}
