//! HTTP client for the prediction backend.
//!
//! [`BackendApi`] is the seam between the UI and the network: the app
//! talks to the trait, [`HttpBackend`] implements it with reqwest, and
//! tests can substitute a stub. The `run_*` helpers are the entry points
//! the UI spawns as tokio tasks; each one settles into exactly one
//! [`AppEvent`], no matter how the call fails, which is what lets the UI
//! release its busy state unconditionally.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::api::error::ApiError;
use crate::api::types::{
    ChatKind, ChatRequest, ChatResponse, PredictionRequest, PredictionResponse, VisualizationData,
};
use crate::app::AppEvent;

/// Backend operations used by the UI.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Submits a prediction request and returns the parsed response.
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ApiError>;

    /// Sends one chat turn and returns the assistant's reply text.
    async fn chat(&self, message: &str, kind: ChatKind) -> Result<String, ApiError>;

    /// Fetches the aggregate dataset summary (logged only, never rendered).
    async fn statistics(&self) -> Result<Value, ApiError>;

    /// Fetches the six chart datasets.
    async fn visualizations(&self) -> Result<VisualizationData, ApiError>;
}

/// reqwest-backed implementation of [`BackendApi`].
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Creates a backend client for the given base URL.
    ///
    /// No request timeout is configured: the UI stays interactive while a
    /// call is pending, and resolution is left to the transport's own
    /// failure modes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("mediquote/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse, ApiError> {
        // Error statuses still carry a JSON body with the failure message,
        // so the body is parsed regardless of status code.
        let response: PredictionResponse = self
            .client
            .post(self.url("predict"))
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            Ok(response)
        } else {
            Err(ApiError::Api(response.error.unwrap_or_default()))
        }
    }

    async fn chat(&self, message: &str, kind: ChatKind) -> Result<String, ApiError> {
        let body = ChatRequest {
            message,
            kind: kind.wire_name(),
        };
        let response: ChatResponse = self
            .client
            .post(self.url("chat"))
            .json(&body)
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            Ok(response.response.unwrap_or_default())
        } else {
            Err(ApiError::Api(response.error.unwrap_or_default()))
        }
    }

    async fn statistics(&self) -> Result<Value, ApiError> {
        let stats = self
            .client
            .get(self.url("statistics"))
            .send()
            .await?
            .json()
            .await?;
        Ok(stats)
    }

    async fn visualizations(&self) -> Result<VisualizationData, ApiError> {
        let data = self
            .client
            .get(self.url("visualizations"))
            .send()
            .await?
            .json()
            .await?;
        Ok(data)
    }
}

/// Runs one prediction round-trip and reports the outcome to the UI.
///
/// Always sends exactly one event, whatever the failure mode: the busy
/// state the caller set before spawning is released when this event is
/// drained.
pub async fn run_prediction(
    backend: Arc<dyn BackendApi>,
    request: PredictionRequest,
    tx: mpsc::Sender<AppEvent>,
) {
    let result = backend.predict(&request).await;
    let _ = tx.send(AppEvent::Prediction(result)).await;
}

/// Runs one chat round-trip and reports the outcome to the UI.
pub async fn run_chat(
    backend: Arc<dyn BackendApi>,
    message: String,
    kind: ChatKind,
    tx: mpsc::Sender<AppEvent>,
) {
    let result = backend.chat(&message, kind).await;
    let _ = tx.send(AppEvent::ChatReply { kind, result }).await;
}

/// Fetches the dataset summary once, for logging.
pub async fn run_statistics(backend: Arc<dyn BackendApi>, tx: mpsc::Sender<AppEvent>) {
    let result = backend.statistics().await;
    let _ = tx.send(AppEvent::Statistics(result)).await;
}

/// Fetches the chart datasets once.
pub async fn run_visualizations(backend: Arc<dyn BackendApi>, tx: mpsc::Sender<AppEvent>) {
    let result = backend.visualizations().await;
    let _ = tx.send(AppEvent::Visualizations(result)).await;
}
