//! Optional trace block appended to generated messages.

use std::time::{Duration, Instant};

use serde::Serialize;

/// Line separating the commit message from the trace block.
pub const TRACE_DELIMITER: &str = "---";

/// Key under which the trace is nested, so it is recognisable in history.
pub const TRACE_KEY: &str = "auto-commit-msg";

/// Model and timing of one generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceRecord {
    pub model: String,
    pub version: String,
    /// Seconds spent waiting for the chat completion, two decimals.
    pub response_time: f64,
    /// Seconds since the workflow started, two decimals.
    pub execution_time: f64,
}

#[derive(Serialize)]
struct TraceEnvelope<'a> {
    #[serde(rename = "auto-commit-msg")]
    trace: &'a TraceRecord,
}

impl TraceRecord {
    pub fn new(model: &str, response: Duration, execution: Duration) -> Self {
        Self {
            model: model.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            response_time: round_secs(response),
            execution_time: round_secs(execution),
        }
    }

    /// Render as a single JSON line keyed by the tool name.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&TraceEnvelope { trace: self })
    }

    /// `message`, the delimiter line, then the JSON trace.
    pub fn append_to(&self, message: &str) -> Result<String, serde_json::Error> {
        let json = self.to_json()?;
        Ok(format!("{message}\n{TRACE_DELIMITER}\n{json}"))
    }
}

/// Seconds rounded to two decimal places.
pub fn round_secs(duration: Duration) -> f64 {
    (duration.as_secs_f64() * 100.0).round() / 100.0
}

/// Start instants for the two latencies a trace reports.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
    request_started: Option<Instant>,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
            request_started: None,
        }
    }

    /// Mark the moment right before the chat completion request.
    pub fn mark_request(&mut self) {
        self.request_started = Some(Instant::now());
    }

    /// Latencies measured up to now: (response, total).
    pub fn elapsed(&self) -> (Duration, Duration) {
        let now = Instant::now();
        let total = now.duration_since(self.started);
        let response = self
            .request_started
            .map(|t| now.duration_since(t))
            .unwrap_or(total);
        (response, total)
    }
}
