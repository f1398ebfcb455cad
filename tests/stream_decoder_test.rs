//! End-to-end decoding of agent query streams.

use agent_composer::infrastructure::stream::{
    decode, decode_stream, DecoderOptions, ProgressEvent, StreamError, StreamHandler,
};
use bytes::Bytes;

#[derive(Default)]
struct Recorder {
    deltas: Vec<String>,
    completions: usize,
    progress: Vec<ProgressEvent>,
}

impl StreamHandler for Recorder {
    fn on_delta(&mut self, delta: &str) {
        self.deltas.push(delta.to_string());
    }

    fn on_complete(&mut self) {
        self.completions += 1;
    }

    fn on_progress(&mut self, event: &ProgressEvent) {
        self.progress.push(event.clone());
    }
}

fn run(input: &str, verbose: bool) -> (Recorder, Result<(), StreamError>) {
    let mut recorder = Recorder::default();
    let result = decode(input.as_bytes(), DecoderOptions::verbose(verbose), &mut recorder);
    (recorder, result)
}

#[test]
fn test_delta_accumulation() {
    let input = concat!(
        "data: {\"event\":\"message_delta\",\"data\":{\"delta\":\"Hel\"}}\n",
        "\n",
        "data: {\"event\":\"message_delta\",\"data\":{\"delta\":\"lo\"}}\n",
        "\n",
        "data: {\"event\":\"outputs\",\"data\":{}}\n",
    );
    let (recorder, result) = run(input, false);
    result.unwrap();
    assert_eq!(recorder.deltas, vec!["Hel", "lo"]);
    assert_eq!(recorder.completions, 1);
}

#[test]
fn test_error_event_terminates() {
    let input = concat!(
        "data: {\"event\":\"message_delta\",\"data\":{\"delta\":\"partial\"}}\n",
        "data: {\"event\":\"error\",\"data\":{\"message\":\"rate limited\"}}\n",
        "data: {\"event\":\"message_complete\"}\n",
    );
    let (recorder, result) = run(input, false);
    let err = result.unwrap_err();
    assert_eq!(err.remote_message(), Some("rate limited"));
    assert_eq!(err.to_string(), "stream error: rate limited");
    assert_eq!(recorder.completions, 0);
    assert_eq!(recorder.deltas, vec!["partial"]);
}

#[test]
fn test_error_event_without_message() {
    let (_, result) = run("data: {\"event\":\"error\"}\n", false);
    assert_eq!(result.unwrap_err().remote_message(), Some("unknown error"));
}

#[test]
fn test_malformed_line_tolerance() {
    let input = "data: {not valid json\ndata: {\"event\":\"end\"}\n";
    let (recorder, result) = run(input, false);
    result.unwrap();
    assert!(recorder.deltas.is_empty());
    assert_eq!(recorder.completions, 0);
}

#[test]
fn test_ignores_non_data_lines() {
    let input = ": keep-alive\n\n: keep-alive\nid: 7\nevent: message\n\ndata: {\"event\":\"end\"}\n";
    let (recorder, result) = run(input, true);
    result.unwrap();
    assert!(recorder.deltas.is_empty());
    assert!(recorder.progress.is_empty());
    assert_eq!(recorder.completions, 0);
}

#[test]
fn test_exhaustion_without_end_is_success() {
    let input = "data: {\"event\":\"message_delta\",\"data\":{\"delta\":\"x\"}}\ndata: [DONE]\n";
    let (recorder, result) = run(input, false);
    result.unwrap();
    assert_eq!(recorder.deltas, vec!["x"]);
}

#[test]
fn test_unknown_and_eventless_payloads_are_ignored() {
    let input = concat!(
        "data: {\"event\":\"heartbeat\",\"data\":{}}\n",
        "data: {\"data\":{\"delta\":\"nope\"}}\n",
        "data: [1, 2, 3]\n",
        "data: \"just a string\"\n",
        "data: {\"event\":\"message_delta\",\"data\":{\"delta\":null}}\n",
    );
    let (recorder, result) = run(input, true);
    result.unwrap();
    assert!(recorder.deltas.is_empty());
    assert_eq!(recorder.completions, 0);
}

#[test]
fn test_verbose_progress_sequence() {
    let input = concat!(
        "data: {\"version\":\"1\",\"event\":{\"type\":\"step_start\",\"step_id\":\"research\"}}\n",
        "data: {\"version\":\"1\",\"event\":{\"type\":\"dynamic_thinking_start\"}}\n",
        "data: {\"version\":\"1\",\"event\":{\"type\":\"dynamic_thinking_end\"}}\n",
        "data: {\"version\":\"1\",\"event\":{\"type\":\"dynamic_tool_call_created\",\"tool_name\":\"search_docs\"}}\n",
        "data: {\"version\":\"1\",\"event\":{\"type\":\"dynamic_tool_call_end\",\"duration\":0.75}}\n",
        "data: {\"version\":\"1\",\"event\":{\"type\":\"dynamic_plan_update\"}}\n",
        "data: {\"version\":\"1\",\"event\":{\"type\":\"step_end\",\"step_id\":\"research\",\"duration\":3.5}}\n",
        "data: {\"version\":\"1\",\"event\":{\"type\":\"dynamic_response_start\"}}\n",
        "data: {\"event\":\"message_delta\",\"data\":{\"delta\":\"answer\"}}\n",
        "data: {\"event\":\"end\"}\n",
    );

    let (recorder, result) = run(input, true);
    result.unwrap();
    assert_eq!(
        recorder.progress,
        vec![
            ProgressEvent::StepStart {
                step_id: "research".to_string()
            },
            ProgressEvent::ThinkingStart,
            ProgressEvent::ThinkingEnd,
            ProgressEvent::ToolCallCreated {
                tool_name: "search_docs".to_string()
            },
            ProgressEvent::ToolCallEnd { duration: 0.75 },
            ProgressEvent::StepEnd {
                step_id: "research".to_string(),
                duration: 3.5
            },
            ProgressEvent::ResponseStart,
        ]
    );
    assert_eq!(recorder.deltas, vec!["answer"]);

    let (quiet, result) = run(input, false);
    result.unwrap();
    assert!(quiet.progress.is_empty());
    assert_eq!(quiet.deltas, vec!["answer"]);
}

#[tokio::test]
async fn test_async_stream_matches_blocking_decoder() {
    let input = concat!(
        ": keep-alive\n",
        "data: {\"event\":\"metadata\",\"data\":{\"conversation_id\":\"c\"}}\n",
        "data: {\"event\":\"message_delta\",\"data\":{\"delta\":\"Hel\"}}\n",
        "data: {\"event\":\"message_delta\",\"data\":{\"delta\":\"lo\"}}\n",
        "data: {\"event\":\"message_complete\"}\n",
        "data: {\"event\":\"end\"}\n",
    );

    // Feed the same bytes in awkward 7-byte chunks.
    let chunks: Vec<Result<Bytes, std::io::Error>> = input
        .as_bytes()
        .chunks(7)
        .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
        .collect();

    let mut recorder = Recorder::default();
    decode_stream(
        futures::stream::iter(chunks),
        DecoderOptions::default(),
        &mut recorder,
    )
    .await
    .unwrap();

    assert_eq!(recorder.deltas, vec!["Hel", "lo"]);
    assert_eq!(recorder.completions, 1);
}

#[tokio::test]
async fn test_async_stream_final_line_without_newline() {
    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![Ok(Bytes::from_static(
        b"data: {\"event\":\"error\",\"data\":{\"message\":\"boom\"}}",
    ))];
    let mut recorder = Recorder::default();
    let err = decode_stream(
        futures::stream::iter(chunks),
        DecoderOptions::default(),
        &mut recorder,
    )
    .await
    .unwrap_err();
    assert_eq!(err.remote_message(), Some("boom"));
}

#[tokio::test]
async fn test_async_transport_error() {
    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from_static(b"data: {\"event\":\"message_delta\",\"data\":{\"delta\":\"a\"}}\n")),
        Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset")),
    ];
    let mut recorder = Recorder::default();
    let err = decode_stream(
        futures::stream::iter(chunks),
        DecoderOptions::default(),
        &mut recorder,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StreamError::Transport(_)));
    assert_eq!(recorder.deltas, vec!["a"]);
}
