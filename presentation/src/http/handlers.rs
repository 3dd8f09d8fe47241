//! Route handlers

use super::AppState;
use super::error::ApiError;
use super::sse::event_stream;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use relay_application::StreamChatInput;
use relay_domain::{Model, SessionId};
use serde::{Deserialize, Deserializer};
use serde_json::{Value, json};
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
pub struct ClearHistoryRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Body of `POST /chat`. Every field is optional here; missing values are
/// reported through the event stream, not as an HTTP error.
///
/// Fields are read one at a time so a badly typed field cannot hide the
/// others. Only a body that is not JSON at all is ignored wholesale.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "lenient_text")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub prompt: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub system_prompt: Option<String>,
    #[serde(default, deserialize_with = "lenient_temperature")]
    pub temperature: Option<f32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub model_id: Option<String>,
}

/// Strings pass through, numbers and booleans are rendered as text, and
/// anything else counts as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Accepts a JSON number or a numeric string. Any other non-null value
/// becomes NaN so the temperature check rejects it.
fn lenient_temperature<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().map_or(f32::NAN, |v| v as f32)),
        Value::String(text) => Some(text.trim().parse().unwrap_or(f32::NAN)),
        _ => Some(f32::NAN),
    })
}

impl From<ChatRequest> for StreamChatInput {
    fn from(request: ChatRequest) -> Self {
        let mut input = StreamChatInput::new(
            request.session_id.unwrap_or_default(),
            request.prompt.unwrap_or_default(),
        );
        input.system_prompt = request.system_prompt;
        input.temperature = request.temperature;
        input.model = request
            .model_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .map(|id| Model::from(id.as_str()));
        input
    }
}

/// `POST /create-session`
pub async fn create_session(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let session_id = state.sessions.create()?;
    Ok(Json(json!({
        "status": "success",
        "session_id": session_id.as_str(),
    })))
}

/// `POST /clear-backend-history`
pub async fn clear_history(
    State(state): State<AppState>,
    body: Result<Json<ClearHistoryRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Unreadable clear-history body: {}", rejection);
            ClearHistoryRequest::default()
        }
    };
    let session_id = SessionId::try_new(request.session_id.unwrap_or_default())?;
    let outcome = state.sessions.clear(&session_id)?;
    Ok(Json(json!({
        "status": "success",
        "message": outcome.message(),
    })))
}

/// `POST /chat`
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("Unreadable chat body: {}", rejection);
            ChatRequest::default()
        }
    };
    event_stream(state.chat.handle_chat(request.into()))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "chat-relay" }))
}
