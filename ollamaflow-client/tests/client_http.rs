//! End-to-end tests against a mock gateway.

use futures::StreamExt;
use ollamaflow_client::types::ollama::{
    ChatMessage, ChatRequest, DeleteModelRequest, GenerateRequest, PullModelRequest,
    ShowModelRequest,
};
use ollamaflow_client::types::openai;
use ollamaflow_client::{ClientConfig, OllamaFlowClient, PumpState};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn bearer_token_is_sent_and_envelope_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "llama3.1", "size": 4_700_000_000u64}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaFlowClient::from_config(
        ClientConfig::new(server.uri()).with_bearer_token("secret-token"),
    );
    let models = client.ollama().list_local_models().await.unwrap();

    assert_eq!(models.len(), 1);
    assert_eq!(models[0].name, "llama3.1");
    assert_eq!(models[0].size, Some(4_700_000_000));
}

#[tokio::test]
async fn listing_accepts_bare_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "llama3.1"},
            {"name": "mistral"}
        ])))
        .mount(&server)
        .await;

    let client = OllamaFlowClient::new(server.uri());
    let models = client.ollama().list_running_models().await.unwrap();

    assert_eq!(models.len(), 2);
    assert_eq!(models[1].name, "mistral");
}

#[tokio::test]
async fn non_success_materializing_yields_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/show"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = OllamaFlowClient::new(server.uri());

    let models = client.ollama().list_local_models().await.unwrap();
    assert!(models.is_empty());

    let info = client
        .ollama()
        .show_model_info(ShowModelRequest::new("missing"))
        .await
        .unwrap();
    assert!(info.is_none());
}

#[tokio::test]
async fn chat_stream_decodes_ndjson_and_stops_on_done() {
    let body = concat!(
        "{\"model\":\"llama3.1\",\"message\":{\"role\":\"assistant\",\"content\":\"Hel\"},\"done\":false}\n",
        "{\"model\":\"llama3.1\",\"message\":{\"role\":\"assistant\",\"content\":\"lo\"},\"done\":false}\n",
        "{\"model\":\"llama3.1\",\"message\":{\"role\":\"assistant\",\"content\":\"\"},\"done\":true,\"done_reason\":\"stop\"}\n",
    );

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
        .mount(&server)
        .await;

    let client = OllamaFlowClient::new(server.uri());
    let request = ChatRequest::new("llama3.1", vec![ChatMessage::user("Say hello")]);
    let mut stream = client.ollama().chat_stream(request).await.unwrap();

    let mut text = String::new();
    let mut records = 0;
    while let Some(record) = stream.next().await {
        let record = record.unwrap();
        if let Some(message) = record.message {
            text.push_str(&message.content);
        }
        records += 1;
    }

    assert_eq!(text, "Hello");
    assert_eq!(records, 3);
    assert_eq!(stream.state(), PumpState::StoppedByPredicate);
}

#[tokio::test]
async fn pull_stream_stops_on_success_sentinel() {
    let body = concat!(
        "{\"status\":\"pulling manifest\"}\n",
        "{\"status\":\"success\"}\n",
        "{\"status\":\"after-the-end\"}\n",
    );

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pull"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
        .mount(&server)
        .await;

    let client = OllamaFlowClient::new(server.uri());
    let mut stream = client
        .ollama()
        .pull_model(PullModelRequest::new("llama3.1"))
        .await
        .unwrap();

    let mut statuses = Vec::new();
    while let Some(progress) = stream.next().await {
        statuses.push(progress.unwrap().status);
    }

    assert_eq!(statuses, vec!["pulling manifest", "success"]);
    assert_eq!(stream.state(), PumpState::StoppedByPredicate);
}

#[tokio::test]
async fn malformed_lines_are_skipped_over_http() {
    let body = concat!(
        "{\"status\":\"a\"}\n",
        "garbage that is not json\n",
        "{\"status\":\"b\"}\n",
    );

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pull"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/x-ndjson"))
        .mount(&server)
        .await;

    let client = OllamaFlowClient::new(server.uri());
    let mut stream = client
        .ollama()
        .pull_model(PullModelRequest::new("llama3.1"))
        .await
        .unwrap();

    let mut statuses = Vec::new();
    while let Some(progress) = stream.next().await {
        statuses.push(progress.unwrap().status);
    }

    assert_eq!(statuses, vec!["a", "b"]);
}

#[tokio::test]
async fn openai_chat_stream_strips_prefix_and_stops_on_finish_reason() {
    let body = concat!(
        "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\",\"content\":\"Hi\"}}]}\n",
        "\n",
        "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"stop\"}]}\n",
        "\n",
        "data: [DONE]\n",
        "\n",
    );

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"stream": true})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let client = OllamaFlowClient::new(server.uri());
    let request = openai::ChatCompletionRequest::new(
        "llama3.1",
        vec![openai::ChatMessage::user("Say hi")],
    );
    let mut stream = client.openai().chat_completion_stream(request).await.unwrap();

    let mut chunks = Vec::new();
    while let Some(chunk) = stream.next().await {
        chunks.push(chunk.unwrap());
    }

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].choices[0].delta.content.as_deref(), Some("Hi"));
    assert!(chunks[1].is_complete());
    assert_eq!(stream.state(), PumpState::StoppedByPredicate);
}

#[tokio::test]
async fn non_success_streaming_yields_empty_stream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pull"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = OllamaFlowClient::new(server.uri());
    let mut stream = client
        .ollama()
        .pull_model(PullModelRequest::new("llama3.1"))
        .await
        .unwrap();

    assert!(stream.next().await.is_none());
    assert_eq!(stream.state(), PumpState::StoppedByFinalChunk);
}

#[tokio::test]
async fn cancellation_before_consumption_yields_empty() {
    use ollamaflow_client::streaming::CancellationToken;

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/pull"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("{\"status\":\"pulling manifest\"}\n", "application/x-ndjson"),
        )
        .mount(&server)
        .await;

    let client = OllamaFlowClient::new(server.uri());
    let token = CancellationToken::new();
    let mut stream = client
        .ollama()
        .pull_model(PullModelRequest::new("llama3.1"))
        .await
        .unwrap()
        .with_cancellation(token.clone());

    token.cancel();
    assert!(stream.next().await.is_none());
    assert_eq!(stream.state(), PumpState::Cancelled);
}

#[tokio::test]
async fn generate_materializing_forces_non_streaming() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({"stream": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.1",
            "response": "Hello there.",
            "done": true,
            "done_reason": "stop"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaFlowClient::new(server.uri());
    let response = client
        .ollama()
        .generate(GenerateRequest::new("llama3.1", "Say hello"))
        .await
        .unwrap()
        .expect("expected a materialized response");

    assert_eq!(response.response, "Hello there.");
    assert!(response.done);
}

#[tokio::test]
async fn delete_model_sends_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/delete"))
        .and(body_partial_json(json!({"model": "old-model"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = OllamaFlowClient::new(server.uri());
    let result = client
        .ollama()
        .delete_model(DeleteModelRequest::new("old-model"))
        .await
        .unwrap();

    assert_eq!(result, Some(json!({})));
}
