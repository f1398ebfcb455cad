//! Line-level decoder for the agent query event stream.
//!
//! The wire format is SSE framing with one JSON payload per `data: ` line.
//! [`EventDecoder`] consumes one line at a time; [`decode`] and
//! [`decode_stream`] drive it from a blocking reader or an async byte stream.

use std::io::BufRead;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use super::errors::StreamError;
use super::events::{EventField, Payload, ProgressEvent, TopLevelEvent};
use super::handler::StreamHandler;

const DATA_PREFIX: &str = "data: ";
const DONE_SENTINEL: &str = "[DONE]";

/// Decoder behaviour switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Surface nested progress events and log retrieval payloads.
    pub verbose: bool,
}

impl DecoderOptions {
    pub const fn verbose(verbose: bool) -> Self {
        Self { verbose }
    }
}

/// What the driver should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Done,
}

/// Per-connection decoding state. Instantiate one per stream.
#[derive(Debug, Default)]
pub struct EventDecoder {
    options: DecoderOptions,
    done: bool,
}

impl EventDecoder {
    pub const fn new(options: DecoderOptions) -> Self {
        Self {
            options,
            done: false,
        }
    }

    /// True once an `end` event has been seen.
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Process one line (without its trailing newline).
    ///
    /// Malformed lines and payloads are skipped. The only error is an
    /// explicit `error` event from the service.
    pub fn feed_line<H>(&mut self, line: &str, handler: &mut H) -> Result<Flow, StreamError>
    where
        H: StreamHandler + ?Sized,
    {
        if self.done {
            return Ok(Flow::Done);
        }

        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.is_empty() || line.starts_with(':') {
            return Ok(Flow::Continue);
        }
        let Some(data) = line.strip_prefix(DATA_PREFIX) else {
            trace!(line, "ignoring non-data line");
            return Ok(Flow::Continue);
        };
        if data.is_empty() || data == DONE_SENTINEL {
            return Ok(Flow::Continue);
        }

        let payload: Payload = match serde_json::from_str(data) {
            Ok(payload) => payload,
            Err(err) => {
                debug!(error = %err, "skipping malformed stream payload");
                return Ok(Flow::Continue);
            }
        };

        let versioned = payload.is_versioned();
        match payload.event {
            Some(EventField::Name(name)) => {
                self.dispatch(TopLevelEvent::from_parts(&name, payload.data), handler)
            }
            Some(EventField::Nested(object)) if versioned && self.options.verbose => {
                match ProgressEvent::from_object(object) {
                    Some(event) => handler.on_progress(&event),
                    None => trace!("ignoring unrecognized progress event"),
                }
                Ok(Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        }
    }

    fn dispatch<H>(&mut self, event: TopLevelEvent, handler: &mut H) -> Result<Flow, StreamError>
    where
        H: StreamHandler + ?Sized,
    {
        match event {
            TopLevelEvent::Metadata(data) => {
                debug!(
                    conversation_id = data.get("conversation_id").and_then(|v| v.as_str()),
                    message_id = data.get("message_id").and_then(|v| v.as_str()),
                    "query metadata"
                );
            }
            TopLevelEvent::MessageDelta(Some(delta)) => handler.on_delta(&delta),
            TopLevelEvent::MessageDelta(None) | TopLevelEvent::Unrecognized => {}
            TopLevelEvent::Complete => handler.on_complete(),
            TopLevelEvent::Retrievals(data) => {
                if self.options.verbose {
                    debug!(retrievals = %data, "retrievals received");
                }
            }
            TopLevelEvent::Error(message) => {
                self.done = true;
                return Err(StreamError::Remote { message });
            }
            TopLevelEvent::End => {
                self.done = true;
                return Ok(Flow::Done);
            }
        }
        Ok(Flow::Continue)
    }
}

/// Decode a blocking, line-oriented reader until `end`, `error` or EOF.
pub fn decode<R, H>(mut reader: R, options: DecoderOptions, handler: &mut H) -> Result<(), StreamError>
where
    R: BufRead,
    H: StreamHandler + ?Sized,
{
    let mut decoder = EventDecoder::new(options);
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(StreamError::transport)?;
        if read == 0 {
            return Ok(());
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        let text = String::from_utf8_lossy(&line);
        if decoder.feed_line(&text, handler)? == Flow::Done {
            return Ok(());
        }
    }
}

/// Decode an async byte stream such as `reqwest::Response::bytes_stream()`.
///
/// Chunks may split lines and multi-byte characters anywhere; only the
/// current partial line is buffered.
pub async fn decode_stream<S, E, H>(
    stream: S,
    options: DecoderOptions,
    handler: &mut H,
) -> Result<(), StreamError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::error::Error + Send + Sync + 'static,
    H: StreamHandler + ?Sized,
{
    let mut decoder = EventDecoder::new(options);
    let mut buffer: Vec<u8> = Vec::new();
    futures::pin_mut!(stream);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(StreamError::transport)?;
        buffer.extend_from_slice(&chunk);

        while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
            let rest = buffer.split_off(pos + 1);
            let mut line = std::mem::replace(&mut buffer, rest);
            line.pop();
            let text = String::from_utf8_lossy(&line);
            if decoder.feed_line(&text, handler)? == Flow::Done {
                return Ok(());
            }
        }
    }

    if !buffer.is_empty() {
        let text = String::from_utf8_lossy(&buffer);
        decoder.feed_line(&text, handler)?;
    }
    Ok(())
}
