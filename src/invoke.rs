//! Invocation contract: turn the three required inputs into one result or one error.
//!
//! A run moves through `ParsingArgs -> Validating -> Running` and ends in
//! `Succeeded` or `Failed`. Each stage consumes the previous one, so a
//! request cannot reach `Running` without passing validation.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::EngineError;
use crate::io::records;
use crate::search::{self, AggregateResult, Algorithm, ScanOpt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ParsingArgs,
    Validating,
    Running,
    Succeeded,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ParsingArgs => "parsing-args",
            Self::Validating => "validating",
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Raw inputs as received from the caller; any of them may be missing.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub algorithm: Option<String>,
    pub pattern: Option<String>,
    pub records: Option<PathBuf>,
    pub threads: usize,
}

/// All required inputs are present; nothing has been checked yet.
#[derive(Debug, Clone)]
pub struct ParsedRequest {
    selector: String,
    pattern: String,
    path: PathBuf,
    threads: usize,
}

#[derive(Debug, Clone)]
pub struct ValidatedRequest {
    algorithm: Algorithm,
    pattern: Vec<u8>,
    path: PathBuf,
    threads: usize,
}

impl SearchRequest {
    pub fn new(algorithm: &str, pattern: &str, records: impl Into<PathBuf>) -> Self {
        Self {
            algorithm: Some(algorithm.to_string()),
            pattern: Some(pattern.to_string()),
            records: Some(records.into()),
            threads: 1,
        }
    }

    /// # Errors
    ///
    /// Returns `EngineError::Usage` naming every missing input.
    pub fn parse(self) -> Result<ParsedRequest, EngineError> {
        let pattern = self.pattern.map(|p| p.trim().to_string()).filter(|p| !p.is_empty());
        let mut missing = Vec::new();
        if self.algorithm.is_none() {
            missing.push("--algorithm");
        }
        if pattern.is_none() {
            missing.push("--pattern");
        }
        if self.records.is_none() {
            missing.push("--csv");
        }

        match (self.algorithm, pattern, self.records) {
            (Some(selector), Some(pattern), Some(path)) => {
                Ok(ParsedRequest { selector, pattern, path, threads: self.threads })
            }
            _ => Err(EngineError::Usage(format!("missing required input: {}", missing.join(", ")))),
        }
    }
}

impl ParsedRequest {
    /// # Errors
    ///
    /// `UnsupportedAlgorithm` for an unknown selector, `Usage` for a zero
    /// worker count, `SourceUnreadable` if the record set is not a readable file.
    pub fn validate(self) -> Result<ValidatedRequest, EngineError> {
        let algorithm: Algorithm = self.selector.parse()?;
        if self.threads == 0 {
            return Err(EngineError::Usage("--threads must be at least 1".to_string()));
        }

        let meta = std::fs::metadata(&self.path).map_err(|e| EngineError::unreadable(&self.path, e))?;
        if !meta.is_file() {
            return Err(EngineError::unreadable(
                &self.path,
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
            ));
        }

        Ok(ValidatedRequest {
            algorithm,
            pattern: self.pattern.to_ascii_uppercase().into_bytes(),
            path: self.path,
            threads: self.threads,
        })
    }
}

impl ValidatedRequest {
    /// Parse the whole record set, then match. A parse failure aborts the run
    /// before any matching starts.
    pub fn run(&self) -> Result<AggregateResult, EngineError> {
        let records = records::load_records(&self.path)?;
        if records.is_empty() {
            warn!(path = %self.path.display(), "record set contains no sequences");
        }
        let opt = ScanOpt { algorithm: self.algorithm, threads: self.threads };
        Ok(search::scan_records(&records, &self.pattern, &opt))
    }
}

/// Drive one request through every stage.
pub fn execute(request: SearchRequest) -> Result<AggregateResult, EngineError> {
    let outcome = run_stages(request);
    match &outcome {
        Ok(_) => debug!(stage = %Stage::Succeeded),
        Err(e) => debug!(stage = %Stage::Failed, error = %e),
    }
    outcome
}

fn run_stages(request: SearchRequest) -> Result<AggregateResult, EngineError> {
    debug!(stage = %Stage::ParsingArgs);
    let parsed = request.parse()?;
    debug!(stage = %Stage::Validating, algorithm = %parsed.selector, path = %parsed.path.display());
    let validated = parsed.validate()?;
    debug!(stage = %Stage::Running, threads = validated.threads);
    validated.run()
}
