//! Document analysis endpoints.
//!
//! `POST /api/analyze` answers once with the outcome. `POST /api/analyze/stream`
//! answers with Server-Sent Events: `progress` events as the governor
//! ticks, then one terminal `result` or `error` event.

use std::convert::Infallible;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{Stream, StreamExt};
use legalens_core::{AnalysisOutcome, LegalensError};
use serde::Serialize;
use serde_json::json;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::server::GatewayState;
use crate::upload::read_document;

const EVENT_BUFFER: usize = 32;

/// Handler for `POST /api/analyze`.
pub async fn analyze(
    State(state): State<GatewayState>,
    form: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisOutcome>, ApiError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let form = form.map_err(rejection)?;
    let document = read_document(form, &state.upload_policy).await?;

    let outcome = state.pipeline.run_unobserved(&request_id, &document).await?;
    info!(request_id = %request_id, outcome = %outcome.extraction, "Analysis complete");
    Ok(Json(outcome))
}

/// Handler for `POST /api/analyze/stream`.
///
/// Admission errors (missing file, bad type, size) are still plain JSON
/// responses; only accepted documents get an event stream.
pub async fn analyze_stream(
    State(state): State<GatewayState>,
    form: Result<Multipart, MultipartRejection>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let form = form.map_err(rejection)?;
    let document = read_document(form, &state.upload_policy).await?;

    let (events_tx, events_rx) = mpsc::channel::<Event>(EVENT_BUFFER);

    tokio::spawn(async move {
        let (progress_tx, mut progress_rx) = watch::channel(0u8);
        let run = state.pipeline.run(&request_id, &document, &progress_tx);
        tokio::pin!(run);

        let result = loop {
            tokio::select! {
                biased;
                result = &mut run => break result,
                changed = progress_rx.changed() => {
                    if changed.is_err() {
                        continue;
                    }
                    let value = *progress_rx.borrow_and_update();
                    if events_tx.send(progress_event(value)).await.is_err() {
                        // Client went away; dropping `run` cancels the extraction.
                        debug!(request_id = %request_id, "Progress stream closed by client");
                        return;
                    }
                }
            }
        };

        let last = *progress_rx.borrow();
        let _ = events_tx.send(progress_event(last)).await;
        let _ = events_tx.send(terminal_event(result)).await;
    });

    let events = ReceiverStream::new(events_rx).map(Ok::<_, Infallible>);
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

fn rejection(err: MultipartRejection) -> ApiError {
    ApiError::new(StatusCode::BAD_REQUEST, "Expected a multipart form upload").with_details(err.body_text())
}

fn progress_event(value: u8) -> Event {
    json_event("progress", &json!({ "progress": value }))
}

fn terminal_event(result: Result<AnalysisOutcome, LegalensError>) -> Event {
    match result {
        Ok(outcome) => json_event("result", &outcome),
        Err(err) => json_event("error", &ApiError::from(err)),
    }
}

fn json_event<T: Serialize>(name: &str, payload: &T) -> Event {
    match serde_json::to_string(payload) {
        Ok(data) => Event::default().event(name).data(data),
        Err(err) => Event::default()
            .event("error")
            .data(json!({ "error": "Failed to encode event", "details": err.to_string() }).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use legalens_chat::MockChat;
    use legalens_core::QUALITY_FALLBACK_MESSAGE;
    use reqwest::multipart::{Form, Part};
    use serde_json::Value;

    use crate::error::TIMEOUT_MESSAGE;
    use crate::server::test_support::{default_state, spawn, state, ScriptedOcr};

    fn upload(bytes: impl Into<Vec<u8>>, file_name: &str, mime: &str) -> Form {
        let part = Part::bytes(bytes.into())
            .file_name(file_name.to_string())
            .mime_str(mime)
            .unwrap();
        Form::new().part("file", part)
    }

    /// `(event, data)` pairs from an SSE body.
    fn parse_events(body: &str) -> Vec<(String, Value)> {
        body.split("\n\n")
            .filter_map(|block| {
                let mut event = None;
                let mut data = None;
                for line in block.lines() {
                    if let Some(name) = line.strip_prefix("event:") {
                        event = Some(name.trim().to_string());
                    } else if let Some(payload) = line.strip_prefix("data:") {
                        data = serde_json::from_str(payload.trim()).ok();
                    }
                }
                Some((event?, data?))
            })
            .collect()
    }

    #[tokio::test]
    async fn analyzes_text_upload() {
        let base = spawn(default_state()).await;
        let text = "This agreement is binding. The party shall pay. Liability is limited. Notice applies.";

        let resp = reqwest::Client::new()
            .post(format!("{base}/api/analyze"))
            .multipart(upload(text, "contract.txt", "text/plain"))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["text"], text);
        assert_eq!(
            body["analysis"]["summary"],
            "This agreement is binding.  The party shall pay.  Liability is limited."
        );
        assert!(body["analysis"]["keyPoints"].is_array());
        assert!(body["analysis"]["potentialIssues"]
            .as_array()
            .unwrap()
            .iter()
            .any(|i| i == "Contains liability limitations or waivers"));
    }

    #[tokio::test]
    async fn short_ocr_text_is_degraded_not_an_error() {
        let state = state(
            ScriptedOcr { delay: Duration::ZERO, text: "ab" },
            Duration::from_secs(5),
            MockChat::new("mock"),
        );
        let base = spawn(state).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/api/analyze"))
            .multipart(upload(vec![0x89, b'P', b'N', b'G'], "scan.png", "image/png"))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["text"], QUALITY_FALLBACK_MESSAGE);
    }

    #[tokio::test]
    async fn missing_file_is_400() {
        let base = spawn(default_state()).await;
        let form = Form::new().text("note", "no file here");

        let resp = reqwest::Client::new()
            .post(format!("{base}/api/analyze"))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "No file provided");
    }

    #[tokio::test]
    async fn unsupported_type_is_400() {
        let base = spawn(default_state()).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/api/analyze"))
            .multipart(upload("%PDF-1.4", "deed.pdf", "application/pdf"))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 400);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("application/pdf"));
    }

    #[tokio::test]
    async fn oversized_upload_is_413() {
        // The test policy allows 1024 bytes.
        let base = spawn(default_state()).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/api/analyze"))
            .multipart(upload(vec![b'a'; 2048], "big.txt", "text/plain"))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 413);
    }

    #[tokio::test]
    async fn non_multipart_body_is_400() {
        let base = spawn(default_state()).await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/api/analyze"))
            .body("plain")
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn slow_ocr_is_504() {
        let state = state(
            ScriptedOcr { delay: Duration::from_secs(30), text: "never seen" },
            Duration::from_millis(200),
            MockChat::new("mock"),
        );
        let base = spawn(state).await;

        let resp = reqwest::Client::new()
            .post(format!("{base}/api/analyze"))
            .multipart(upload(vec![1, 2, 3], "scan.jpg", "image/jpeg"))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 504);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], TIMEOUT_MESSAGE);
        assert!(body["details"].as_str().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn stream_ends_with_full_progress_then_result() {
        let state = state(
            ScriptedOcr {
                delay: Duration::from_millis(1200),
                text: "The indemnity clause survives termination.",
            },
            Duration::from_secs(5),
            MockChat::new("mock"),
        );
        let base = spawn(state).await;

        let body = reqwest::Client::new()
            .post(format!("{base}/api/analyze/stream"))
            .multipart(upload(vec![1, 2, 3], "scan.png", "image/png"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        let events = parse_events(&body);
        let progress: Vec<u64> = events
            .iter()
            .filter(|(name, _)| name == "progress")
            .map(|(_, data)| data["progress"].as_u64().unwrap())
            .collect();
        assert!(progress.windows(2).all(|w| w[0] <= w[1]), "{progress:?}");
        assert_eq!(progress.last(), Some(&100));
        assert!(progress[..progress.len() - 1].iter().all(|p| *p <= 95));

        let (last_name, last_data) = events.last().unwrap();
        assert_eq!(last_name, "result");
        assert_eq!(last_data["text"], "The indemnity clause survives termination.");
    }

    #[tokio::test]
    async fn stream_reports_timeout_as_error_event() {
        let state = state(
            ScriptedOcr { delay: Duration::from_secs(30), text: "never seen" },
            Duration::from_millis(300),
            MockChat::new("mock"),
        );
        let base = spawn(state).await;

        let body = reqwest::Client::new()
            .post(format!("{base}/api/analyze/stream"))
            .multipart(upload(vec![1, 2, 3], "scan.png", "image/png"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();

        let events = parse_events(&body);
        let (name, data) = events.last().unwrap();
        assert_eq!(name, "error");
        assert_eq!(data["error"], TIMEOUT_MESSAGE);

        let (name, data) = &events[events.len() - 2];
        assert_eq!(name, "progress");
        assert_eq!(data["progress"], 100);
    }
}
