//! HTTP surface for the debate service
//!
//! A plain hyper/1 service: one spawned task per connection, routes matched
//! on `(Method, path)`, JSON bodies in and out. Handlers are free functions
//! over the shared immutable state so they stay unit-testable.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::HeaderValue;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use kopi_core::{ChatEngine, ChatError};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::api::{ChatResponse, ErrorResponse, MessageRequest};

/// Service name reported in response headers and the root descriptor.
pub const SERVICE_NAME: &str = "kopi-debate";

/// Immutable application state shared across request handlers
pub struct AppState {
    pub engine: ChatEngine,
    /// Which optional backends were activated at startup
    pub backends: BackendFlags,
    /// Configured reply ceiling in seconds, echoed in timeout errors
    pub max_reply_secs: u64,
}

/// Feature flags for the optional backends, fixed at startup
#[derive(Clone, Copy, Debug, Default)]
pub struct BackendFlags {
    pub gemini: bool,
    pub redis: bool,
    pub sqlite: bool,
}

/// Start the HTTP server.
///
/// Binds `addr` and serves requests until the process is terminated.
pub async fn run(addr: SocketAddr, state: Arc<AppState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("{} listening on http://{}", SERVICE_NAME, addr);

    loop {
        let (stream, _remote) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let state = state.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let state = state.clone();
                async move { handle_request(req, state).await }
            });
            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                debug!("connection error: {}", e);
            }
        });
    }
}

async fn handle_request(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match (method, path.as_str()) {
        (Method::GET, "/") => handle_root(&state),
        (Method::GET, "/healthz") => json_response(StatusCode::OK, r#"{"status":"ok"}"#),
        (Method::POST, "/chat") => match req.into_body().collect().await {
            Ok(collected) => handle_chat(&state, &collected.to_bytes()).await,
            Err(e) => error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("could not read request body: {}", e),
            ),
        },
        _ => error_response(StatusCode::NOT_FOUND, "Not Found"),
    };

    Ok(response)
}

fn handle_root(state: &AppState) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "ready": true,
        "gemini": state.backends.gemini,
        "redis": state.backends.redis,
        "sqlite": state.backends.sqlite,
    });
    json_response(StatusCode::OK, &body.to_string())
}

/// Run one chat request from raw body bytes to a JSON response.
async fn handle_chat(state: &AppState, body: &[u8]) -> Response<Full<Bytes>> {
    let request: MessageRequest = match serde_json::from_slice(body) {
        Ok(request) => request,
        Err(e) => {
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                &format!("invalid request body: {}", e),
            )
        }
    };

    let result = state
        .engine
        .chat(request.conversation_id.as_deref(), &request.message)
        .await;

    match result {
        Ok(outcome) => {
            let payload = ChatResponse {
                conversation_id: outcome.conversation_id,
                message: outcome.turns,
            };
            let body = serde_json::to_string(&payload).unwrap_or_default();
            let mut response = json_response(StatusCode::OK, &body);
            let headers = response.headers_mut();
            if let Ok(value) = HeaderValue::from_str(&payload.conversation_id) {
                headers.insert("X-Conversation-Id", value);
            }
            headers.insert("X-Service", HeaderValue::from_static(SERVICE_NAME));
            response
        }
        Err(ChatError::InvalidMessage(detail)) => {
            error_response(StatusCode::UNPROCESSABLE_ENTITY, &detail)
        }
        Err(ChatError::Timeout { .. }) => error_response(
            StatusCode::REQUEST_TIMEOUT,
            &format!("Response time exceeded {} seconds", state.max_reply_secs),
        ),
        Err(ChatError::Internal(err)) => {
            error!("chat request failed: {:#}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
        }
    }
}

fn error_response(status: StatusCode, detail: &str) -> Response<Full<Bytes>> {
    let body = serde_json::to_string(&ErrorResponse {
        detail: detail.to_string(),
    })
    .unwrap_or_default();
    json_response(status, &body)
}

fn json_response(status: StatusCode, body: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from(r#"{"detail":"internal"}"#))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use config::Settings;
    use kopi_core::{MemoryStore, MockGenerator, ReplyGenerator};
    use std::time::Duration;

    fn test_state() -> AppState {
        let settings = Settings::default();
        AppState {
            engine: ChatEngine::new(
                Arc::new(MemoryStore::new(settings.history_soft_limit)),
                Arc::new(MockGenerator),
                &settings,
            ),
            backends: BackendFlags::default(),
            max_reply_secs: settings.max_reply_secs,
        }
    }

    #[test]
    fn test_json_response_sets_content_type() {
        let response = json_response(StatusCode::OK, r#"{"ok":true}"#);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_error_response_wraps_detail() {
        let response = error_response(StatusCode::NOT_FOUND, "Not Found");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_chat_happy_path() {
        let state = test_state();
        let body = br#"{"message": "Prove that dogs are better than cats"}"#;
        let response = handle_chat(&state, body).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("X-Conversation-Id"));
        assert_eq!(response.headers().get("X-Service").unwrap(), SERVICE_NAME);

        let collected = response.into_body().collect().await.unwrap().to_bytes();
        let payload: serde_json::Value = serde_json::from_slice(&collected).unwrap();
        assert!(payload["conversation_id"].as_str().unwrap().starts_with("conv_"));
        let turns = payload["message"].as_array().unwrap();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0]["role"], "bot");
        assert_eq!(turns.last().unwrap()["role"], "bot");
    }

    #[tokio::test]
    async fn test_chat_reuses_supplied_conversation_id() {
        let state = test_state();
        let first = handle_chat(&state, br#"{"message": "Prove that dogs are better than cats"}"#)
            .await;
        let collected = first.into_body().collect().await.unwrap().to_bytes();
        let payload: serde_json::Value = serde_json::from_slice(&collected).unwrap();
        let cid = payload["conversation_id"].as_str().unwrap().to_string();

        let body = format!(r#"{{"conversation_id": "{}", "message": "dogs bark too much"}}"#, cid);
        let second = handle_chat(&state, body.as_bytes()).await;
        assert_eq!(second.status(), StatusCode::OK);
        assert_eq!(
            second.headers().get("X-Conversation-Id").unwrap(),
            cid.as_str()
        );
    }

    #[tokio::test]
    async fn test_chat_rejects_malformed_body() {
        let state = test_state();
        let response = handle_chat(&state, b"{not json").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_message() {
        let state = test_state();
        let response = handle_chat(&state, br#"{"message": "   "}"#).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_times_out_with_408() {
        struct SlowGenerator;

        #[async_trait]
        impl ReplyGenerator for SlowGenerator {
            async fn generate_reply(
                &self,
                claim: &str,
                _: &str,
                _: &str,
            ) -> anyhow::Result<String> {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok(claim.to_string())
            }
        }

        let settings = Settings::default();
        let state = AppState {
            engine: ChatEngine::new(
                Arc::new(MemoryStore::new(settings.history_soft_limit)),
                Arc::new(SlowGenerator),
                &settings,
            ),
            backends: BackendFlags::default(),
            max_reply_secs: settings.max_reply_secs,
        };

        let response = handle_chat(&state, br#"{"message": "The Earth is flat"}"#).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let collected = response.into_body().collect().await.unwrap().to_bytes();
        let payload: serde_json::Value = serde_json::from_slice(&collected).unwrap();
        assert_eq!(payload["detail"], "Response time exceeded 30 seconds");
    }

    #[tokio::test]
    async fn test_root_reports_backend_flags() {
        let state = test_state();
        let response = handle_root(&state);
        let collected = response.into_body().collect().await.unwrap().to_bytes();
        let payload: serde_json::Value = serde_json::from_slice(&collected).unwrap();
        assert_eq!(payload["name"], SERVICE_NAME);
        assert_eq!(payload["ready"], true);
        assert_eq!(payload["gemini"], false);
        assert_eq!(payload["redis"], false);
        assert_eq!(payload["sqlite"], false);
    }
}
