use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EngineError;

pub mod aggregate;
pub mod kmp;
pub mod rabin_karp;

pub use aggregate::{scan_records, AggregateResult, MatchResult, ScanOpt};
pub use kmp::{kmp_search, Kmp};
pub use rabin_karp::{rabin_karp_search, RabinKarp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Kmp,
    RabinKarp,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kmp => "kmp",
            Self::RabinKarp => "rabin_karp",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    /// Only the exact selectors `kmp` and `rabin_karp` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kmp" => Ok(Self::Kmp),
            "rabin_karp" => Ok(Self::RabinKarp),
            other => Err(EngineError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Outcome of matching one sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hits {
    pub offsets: Vec<usize>,
    pub hash_collisions: u64,
}

/// A matcher prepared once for a pattern and shared by every sequence of a run.
#[derive(Debug, Clone)]
pub enum Matcher {
    Kmp(Kmp),
    RabinKarp(RabinKarp),
}

impl Matcher {
    pub fn new(algorithm: Algorithm, pattern: &[u8]) -> Self {
        match algorithm {
            Algorithm::Kmp => Self::Kmp(Kmp::new(pattern)),
            Algorithm::RabinKarp => Self::RabinKarp(RabinKarp::new(pattern)),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Kmp(_) => Algorithm::Kmp,
            Self::RabinKarp(_) => Algorithm::RabinKarp,
        }
    }

    pub fn find_all(&self, text: &[u8]) -> Hits {
        match self {
            Self::Kmp(kmp) => Hits { offsets: kmp.find_all(text), hash_collisions: 0 },
            Self::RabinKarp(rk) => {
                let hits = rk.find_all(text);
                Hits { offsets: hits.offsets, hash_collisions: hits.collisions }
            }
        }
    }
}
