//! The gateway client: verb layer, status gate, streaming entry point.

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::ollama::OllamaApi;
use crate::openai::OpenAiApi;
use futures::StreamExt;
use ollamaflow_streaming::{
    decode_listing, Chunk, ChunkStream, LineTransform, RecordStream, StreamError,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record stream produced by a streaming client call.
///
/// Chain [`RecordStream::with_cancellation`] or
/// [`RecordStream::with_observer`] on it before consuming.
pub type FlowStream<T> = RecordStream<ChunkStream, T>;

/// Client for an OllamaFlow-compatible gateway.
///
/// Holds one `reqwest` client and the endpoint/auth configuration. API
/// methods are grouped by wire dialect: [`ollama`](Self::ollama) for the
/// native NDJSON dialect, [`openai`](Self::openai) for the
/// OpenAI-compatible event-stream dialect.
#[derive(Debug, Clone)]
pub struct OllamaFlowClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl OllamaFlowClient {
    /// Create a client for the given endpoint with default configuration.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::from_config(ClientConfig::new(endpoint))
    }

    /// Create a client from an explicit configuration.
    pub fn from_config(config: ClientConfig) -> Self {
        Self {
            http: config.build_client(),
            config,
        }
    }

    /// The configured endpoint, without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// Native-dialect API methods.
    pub fn ollama(&self) -> OllamaApi<'_> {
        OllamaApi::new(self)
    }

    /// OpenAI-compatible API methods.
    pub fn openai(&self) -> OpenAiApi<'_> {
        OpenAiApi::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// GET a single JSON object. Non-2xx yields `Ok(None)`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>> {
        let url = self.url(path);
        tracing::debug!(%url, "GET request");
        let response = self.authorized(self.http.get(&url)).send().await?;
        self.decode_response(response, &url).await
    }

    /// GET a list, decoded as a direct array or an enveloped object under
    /// the first present key of `keys`. Non-2xx yields an empty list.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        keys: &'static [&'static str],
    ) -> ClientResult<Vec<T>> {
        let url = self.url(path);
        tracing::debug!(%url, "GET request");
        let response = self.authorized(self.http.get(&url)).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "non-success response");
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        tracing::debug!(%url, bytes = body.len(), "response body");
        Ok(decode_listing(&body, keys))
    }

    /// POST a JSON body, returning the decoded response object.
    /// Non-2xx yields `Ok(None)`.
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>> {
        let url = self.url(path);
        tracing::debug!(%url, "POST request");
        let response = self.authorized(self.http.post(&url)).json(body).send().await?;
        self.decode_response(response, &url).await
    }

    /// DELETE with a JSON body, returning the decoded response object.
    /// Non-2xx yields `Ok(None)`.
    pub async fn delete_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Option<T>> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE request");
        let response = self
            .authorized(self.http.delete(&url))
            .json(body)
            .send()
            .await?;
        self.decode_response(response, &url).await
    }

    /// DELETE without a body; `true` on a 2xx status.
    pub async fn delete(&self, path: &str) -> ClientResult<bool> {
        let url = self.url(path);
        tracing::debug!(%url, "DELETE request");
        let response = self.authorized(self.http.delete(&url)).send().await?;
        Ok(response.status().is_success())
    }

    /// POST a JSON body and decode the streamed response as line-delimited
    /// records.
    ///
    /// The stream owns the response body and releases it when dropped. A
    /// non-2xx status yields an immediately empty stream, not an error.
    pub async fn post_stream<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        transform: LineTransform,
    ) -> ClientResult<FlowStream<T>> {
        let url = self.url(path);
        tracing::debug!(%url, "POST request (streaming)");
        let response = self.authorized(self.http.post(&url)).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "non-success response, empty stream");
            let empty: ChunkStream = futures::stream::empty().boxed();
            return Ok(RecordStream::new(empty).with_transform(transform));
        }

        let chunks: ChunkStream = response
            .bytes_stream()
            .map(|item| item.map(Chunk::new).map_err(StreamError::transport))
            .boxed();
        Ok(RecordStream::new(chunks).with_transform(transform))
    }

    async fn decode_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        url: &str,
    ) -> ClientResult<Option<T>> {
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "non-success response");
            return Ok(None);
        }

        let body = response.text().await?;
        tracing::debug!(%url, bytes = body.len(), "response body");
        if body.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }
}
