//! Test helpers shared by handler tests: a scripted generator, a config
//! builder and a one-shot request runner.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::llm_client::{LlmError, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

/// Returns the same reply for every model, or a 503 for every model when
/// `reply` is `None`. Records each `(model, prompt)` call in order.
pub struct StaticGenerator {
    reply: Option<String>,
    calls: Mutex<Vec<(String, String)>>,
}

impl StaticGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(text.to_string()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StaticGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(LlmError::Api {
                status: 503,
                message: format!("{model} is overloaded"),
            }),
        }
    }
}

pub fn test_config(api_key: Option<&str>) -> Config {
    Config {
        gemini_api_key: api_key.map(str::to_string),
        gemini_api_base: "http://127.0.0.1:9".to_string(),
        model_timeout: Duration::from_secs(5),
        port: 0,
        rust_log: "debug".to_string(),
    }
}

pub fn test_router(generator: Arc<StaticGenerator>, api_key: Option<&str>) -> Router {
    build_router(AppState {
        llm: generator,
        config: test_config(api_key),
    })
}

/// Sends one request through the router and decodes the JSON body
/// (`Value::Null` for an empty body).
pub async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
    let (status, _, json) = send_with_headers(app, method, uri, body).await;
    (status, json)
}

/// Like `send`, but also hands back the response headers.
pub async fn send_with_headers(
    app: Router,
    method: Method,
    uri: &str,
    body: &str,
) -> (StatusCode, HeaderMap, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}
