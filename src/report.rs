//! JSON payloads emitted for a finished run.
//!
//! Key names and their order are part of the external contract: callers store
//! the payload verbatim. For identical inputs the output is byte-identical
//! apart from `execution_time_ms`.

use std::io::Write;

use serde::Serialize;

use crate::error::{EngineError, ErrorKind};
use crate::search::{AggregateResult, Algorithm, MatchResult};

#[derive(Debug, Serialize)]
pub struct SuccessPayload<'a> {
    pub success: bool,
    pub algorithm: Algorithm,
    pub pattern: &'a str,
    pub total_sequences: usize,
    pub match_count: usize,
    pub execution_time_ms: f64,
    pub threads_used: usize,
    pub hash_collisions: u64,
    pub results: Vec<SequencePayload<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SequencePayload<'a> {
    pub label: &'a str,
    pub offsets: &'a [usize],
}

#[derive(Debug, Serialize)]
pub struct FailurePayload {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl<'a> From<&'a MatchResult> for SequencePayload<'a> {
    fn from(m: &'a MatchResult) -> Self {
        Self { label: &m.label, offsets: &m.offsets }
    }
}

impl<'a> From<&'a AggregateResult> for SuccessPayload<'a> {
    fn from(r: &'a AggregateResult) -> Self {
        Self {
            success: true,
            algorithm: r.algorithm,
            pattern: &r.pattern,
            total_sequences: r.total_sequences,
            match_count: r.match_count,
            execution_time_ms: r.execution_time_ms,
            threads_used: r.threads_used,
            hash_collisions: r.hash_collisions,
            results: r.per_sequence.iter().map(SequencePayload::from).collect(),
        }
    }
}

impl From<&EngineError> for FailurePayload {
    fn from(e: &EngineError) -> Self {
        Self {
            success: false,
            error: ErrorBody { kind: e.kind(), message: e.to_string(), row: e.row() },
        }
    }
}

pub fn encode_success(result: &AggregateResult) -> serde_json::Result<String> {
    let mut s = serde_json::to_string_pretty(&SuccessPayload::from(result))?;
    s.push('\n');
    Ok(s)
}

pub fn encode_failure(error: &EngineError) -> serde_json::Result<String> {
    let mut s = serde_json::to_string_pretty(&FailurePayload::from(error))?;
    s.push('\n');
    Ok(s)
}

/// Write an already encoded payload and flush it.
pub fn write_payload<W: Write>(mut out: W, payload: &str) -> std::io::Result<()> {
    out.write_all(payload.as_bytes())?;
    out.flush()
}
