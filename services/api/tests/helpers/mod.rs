//! Shared fixtures for the bridge integration tests: a stub Bolna API, a
//! running bridge, and a minimal SSE client that speaks the MCP handshake.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    routing::get,
};
use bolna_api::{router::create_router, state::AppState};
use bolna_core::upstream::{BolnaClient, UpstreamConfig};
use serde_json::{Value, json};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;

const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

async fn get_agent(Path(agent_id): Path<String>) -> Json<Value> {
    if agent_id == "slow" {
        tokio::time::sleep(Duration::from_millis(300)).await;
    }
    Json(json!({ "id": agent_id, "name": "X" }))
}

/// Starts a stub of the Bolna API under `/v2`.
///
/// - `GET /v2/agent/all` returns two agents.
/// - `GET /v2/agent/{id}` echoes the id; the id `slow` answers after 300ms.
/// - `DELETE /v2/agent/{id}` always fails with 500.
/// - everything else is 404.
pub async fn start_stub_upstream() -> SocketAddr {
    let app = Router::new()
        .route(
            "/v2/agent/all",
            get(|| async { Json(json!([{ "id": "a1" }, { "id": "a2" }])) }),
        )
        .route(
            "/v2/agent/{agent_id}",
            get(get_agent).delete(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Starts the bridge against `upstream` and returns its address and state.
pub async fn start_bridge(upstream: SocketAddr) -> (SocketAddr, Arc<AppState>) {
    let client = BolnaClient::new(UpstreamConfig {
        base_url: format!("http://{}/v2", upstream),
        api_key: "test-key".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();
    let state = Arc::new(AppState::new(Arc::new(client)));
    let app = create_router(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

/// One open `/sse` stream plus the endpoint it advertised.
pub struct SseClient {
    http: reqwest::Client,
    bridge: SocketAddr,
    response: reqwest::Response,
    buffer: String,
    pub endpoint: String,
}

impl SseClient {
    /// Opens the stream and consumes the `endpoint` event.
    pub async fn connect(bridge: SocketAddr) -> Self {
        let http = reqwest::Client::new();
        let response = http
            .get(format!("http://{}/sse", bridge))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let mut client = Self {
            http,
            bridge,
            response,
            buffer: String::new(),
            endpoint: String::new(),
        };
        let (event, data) = client.next_event().await;
        assert_eq!(event, "endpoint");
        client.endpoint = data;
        client
    }

    /// The session id from the advertised endpoint.
    pub fn session(&self) -> uuid::Uuid {
        let raw = self.endpoint.rsplit('=').next().unwrap();
        uuid::Uuid::parse_str(raw).unwrap()
    }

    /// Reads the next event that carries data, skipping keep-alive comments.
    pub async fn next_event(&mut self) -> (String, String) {
        loop {
            if let Some(pos) = self.buffer.find("\n\n") {
                let raw: String = self.buffer.drain(..pos + 2).collect();
                let mut event = "message".to_string();
                let mut data = Vec::new();
                for line in raw.lines() {
                    if let Some(value) = line.strip_prefix("event:") {
                        event = value.trim_start().to_string();
                    } else if let Some(value) = line.strip_prefix("data:") {
                        data.push(value.strip_prefix(' ').unwrap_or(value).to_string());
                    }
                }
                if data.is_empty() {
                    continue;
                }
                return (event, data.join("\n"));
            }

            let chunk = tokio::time::timeout(EVENT_TIMEOUT, self.response.chunk())
                .await
                .expect("timed out waiting for an SSE event")
                .unwrap()
                .expect("SSE stream closed");
            self.buffer.push_str(&String::from_utf8_lossy(&chunk));
        }
    }

    /// Reads messages until the JSON-RPC response with `id` arrives.
    pub async fn response_for(&mut self, id: i64) -> Value {
        loop {
            let (event, data) = self.next_event().await;
            assert_eq!(event, "message");
            let message: Value = serde_json::from_str(&data).unwrap();
            if message["id"] == json!(id) {
                return message;
            }
        }
    }

    pub async fn post(&self, message: Value) -> reqwest::StatusCode {
        self.http
            .post(format!("http://{}{}", self.bridge, self.endpoint))
            .json(&message)
            .send()
            .await
            .unwrap()
            .status()
    }

    /// Runs the MCP initialize handshake and returns the initialize result.
    pub async fn initialize(&mut self) -> Value {
        let status = self
            .post(json!({
                "jsonrpc": "2.0",
                "id": 0,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": {},
                    "clientInfo": { "name": "bridge-test", "version": "0.0.1" }
                }
            }))
            .await;
        assert_eq!(status, reqwest::StatusCode::ACCEPTED);
        let response = self.response_for(0).await;

        let status = self
            .post(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }))
            .await;
        assert_eq!(status, reqwest::StatusCode::ACCEPTED);

        response["result"].clone()
    }

    pub async fn send_tool_call(&self, id: i64, name: &str, arguments: Value) {
        let status = self
            .post(json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "tools/call",
                "params": { "name": name, "arguments": arguments }
            }))
            .await;
        assert_eq!(status, reqwest::StatusCode::ACCEPTED);
    }

    pub async fn call_tool(&mut self, id: i64, name: &str, arguments: Value) -> Value {
        self.send_tool_call(id, name, arguments).await;
        self.response_for(id).await
    }
}

/// Parses the JSON text content of a successful `tools/call` response.
pub fn tool_json(response: &Value) -> Value {
    let text = response["result"]["content"][0]["text"]
        .as_str()
        .expect("tool result should carry text content");
    serde_json::from_str(text).unwrap()
}

pub fn is_tool_error(response: &Value) -> bool {
    response["result"]["isError"] == json!(true)
}
