//! Incremental decoder for `text/event-stream` bodies from Gemini's
//! `streamGenerateContent?alt=sse`.

use std::collections::VecDeque;

use anyhow::{anyhow, Context, Result};
use bytes::Bytes;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde_json::Value;

/// Buffers raw bytes and yields complete lines; never splits a UTF-8
/// sequence because it only cuts on `\n`.
#[derive(Debug, Default)]
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut lines = Vec::new();
        while let Some(pos) = self.pending.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            lines.push(String::from_utf8_lossy(&line).trim_end().to_string());
        }
        lines
    }

    fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&rest).trim_end().to_string())
    }
}

/// Text of one `data:` line, if it carries any.
fn parse_data_line(line: &str) -> Option<Result<String>> {
    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() || payload == "[DONE]" {
        return None;
    }
    let json: Value = match serde_json::from_str(payload).context("Malformed stream chunk") {
        Ok(json) => json,
        Err(e) => return Some(Err(e)),
    };
    if let Some(message) = json["error"]["message"].as_str() {
        return Some(Err(anyhow!("upstream error: {message}")));
    }
    let text: String = json["candidates"][0]["content"]["parts"]
        .as_array()?
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    if text.is_empty() {
        None
    } else {
        Some(Ok(text))
    }
}

struct DecodeState {
    body: BoxStream<'static, Result<Bytes>>,
    lines: LineBuffer,
    ready: VecDeque<Result<String>>,
    done: bool,
}

/// Turn an SSE byte stream into a stream of text deltas.
///
/// A transport error is yielded once and ends the stream.
pub fn text_deltas<S, E>(body: S) -> BoxStream<'static, Result<String>>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let state = DecodeState {
        body: body.map(|chunk| chunk.context("Chat stream interrupted")).boxed(),
        lines: LineBuffer::default(),
        ready: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(item) = state.ready.pop_front() {
                return Some((item, state));
            }
            if state.done {
                return None;
            }
            match state.body.next().await {
                Some(Ok(chunk)) => {
                    for line in state.lines.push(&chunk) {
                        state.ready.extend(parse_data_line(&line));
                    }
                }
                Some(Err(e)) => {
                    state.done = true;
                    state.ready.push_back(Err(e));
                }
                None => {
                    state.done = true;
                    if let Some(line) = state.lines.finish() {
                        state.ready.extend(parse_data_line(&line));
                    }
                }
            }
        }
    })
    .boxed()
}
