//! Legal-assistant chat relay (`POST /api/chat`).
//!
//! Streams the provider's deltas as SSE `{"delta": ...}` events and closes
//! with `[DONE]`. A provider failure mid-stream becomes an `error` event
//! and ends the stream without `[DONE]`.

use std::convert::Infallible;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream, StreamExt};
use legalens_chat::build_request;
use legalens_core::{ChatMessage, ChatRole, ChatStream, LegalensError};
use legalens_logging::{EventLogger, PipelineEvent};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::error::ApiError;
use crate::server::GatewayState;

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub messages: Vec<ChatMessage>,
}

/// Handler for `POST /api/chat`.
pub async fn chat(
    State(state): State<GatewayState>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let Json(body) = body.map_err(|err| {
        ApiError::new(StatusCode::BAD_REQUEST, "Invalid request").with_details(err.body_text())
    })?;

    let request = build_request(body.messages)?;
    let last_user_message = request
        .messages
        .iter()
        .rev()
        .find(|m| m.role == ChatRole::User)
        .map(|m| m.content.clone())
        .unwrap_or_default();

    let deltas = state
        .chat
        .stream_chat(&request)
        .await
        .map_err(|err| LegalensError::Chat {
            provider: state.chat.name().to_string(),
            message: format!("{err:#}"),
        })?;

    EventLogger::log_event(
        &request_id,
        PipelineEvent::ChatRelayed {
            provider: state.chat.name().to_string(),
            messages: request.messages.len(),
            last_user_message,
        },
    );

    let events = delta_events(deltas, request_id).map(Ok::<_, Infallible>);
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn delta_events(deltas: ChatStream, request_id: String) -> impl Stream<Item = Event> {
    stream::unfold(Some(deltas), move |state| {
        let request_id = request_id.clone();
        async move {
            let mut deltas = state?;
            match deltas.next().await {
                Some(Ok(delta)) => {
                    let event = Event::default().data(json!({ "delta": delta }).to_string());
                    Some((event, Some(deltas)))
                }
                Some(Err(err)) => {
                    warn!(request_id = %request_id, error = %err, "Chat stream failed");
                    let event = Event::default()
                        .event("error")
                        .data(json!({ "error": "Chat provider failed", "details": format!("{err:#}") }).to_string());
                    Some((event, None))
                }
                None => Some((Event::default().data("[DONE]"), None)),
            }
        }
    })
}
