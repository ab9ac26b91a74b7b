use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn};

use super::{Algorithm, Hits, Matcher};
use crate::io::records::SequenceRecord;

#[derive(Clone, Copy, Debug)]
pub struct ScanOpt {
    pub algorithm: Algorithm,
    /// 工作线程数；1 表示在调用线程上顺序执行
    pub threads: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub label: String,
    pub offsets: Vec<usize>,
}

/// Result of one search run. `per_sequence` follows input order.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateResult {
    pub algorithm: Algorithm,
    pub pattern: String,
    pub total_sequences: usize,
    pub match_count: usize,
    /// Wall-clock time of the matching phase only; not reproducible between runs.
    pub execution_time_ms: f64,
    pub threads_used: usize,
    pub hash_collisions: u64,
    pub per_sequence: Vec<MatchResult>,
}

/// Run one matcher over every record and aggregate the hits.
///
/// Timing covers only the matcher invocations: worker pool setup happens
/// before the clock starts and result assembly after it stops.
pub fn scan_records(records: &[SequenceRecord], pattern: &[u8], opt: &ScanOpt) -> AggregateResult {
    let matcher = Matcher::new(opt.algorithm, pattern);
    let threads = opt.threads.clamp(1, records.len().max(1));

    let pool = if threads > 1 {
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!("cannot start {threads} workers, matching sequentially: {e}");
                None
            }
        }
    } else {
        None
    };
    let threads_used = if pool.is_some() { threads } else { 1 };

    let start = Instant::now();
    let hits: Vec<Hits> = match &pool {
        // 有序的并行迭代器，collect 后顺序与输入一致
        Some(pool) => pool.install(|| records.par_iter().map(|rec| matcher.find_all(&rec.seq)).collect()),
        None => records.iter().map(|rec| matcher.find_all(&rec.seq)).collect(),
    };
    let elapsed = start.elapsed();

    let mut match_count = 0usize;
    let mut hash_collisions = 0u64;
    let per_sequence: Vec<MatchResult> = records
        .iter()
        .zip(hits)
        .map(|(rec, h)| {
            match_count += h.offsets.len();
            hash_collisions += h.hash_collisions;
            MatchResult { label: rec.label.clone(), offsets: h.offsets }
        })
        .collect();

    let result = AggregateResult {
        algorithm: matcher.algorithm(),
        pattern: String::from_utf8_lossy(pattern).into_owned(),
        total_sequences: records.len(),
        match_count,
        execution_time_ms: elapsed.as_secs_f64() * 1000.0,
        threads_used,
        hash_collisions,
        per_sequence,
    };
    info!(
        algorithm = %result.algorithm,
        sequences = result.total_sequences,
        matches = result.match_count,
        threads = result.threads_used,
        "scan finished in {:.3} ms",
        result.execution_time_ms
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(label: &str, seq: &[u8]) -> SequenceRecord {
        SequenceRecord { label: label.to_string(), seq: seq.to_vec() }
    }

    fn records() -> Vec<SequenceRecord> {
        vec![
            rec("S1", b"AAAA"),
            rec("S2", b"ACGT"),
            rec("S1", b"TTAATTAA"),
            rec("S3", b"A"),
        ]
    }

    #[test]
    fn counts_and_order() {
        let opt = ScanOpt { algorithm: Algorithm::Kmp, threads: 1 };
        let res = scan_records(&records(), b"AA", &opt);
        assert_eq!(res.total_sequences, 4);
        let labels: Vec<&str> = res.per_sequence.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["S1", "S2", "S1", "S3"]);
        assert_eq!(res.per_sequence[0].offsets, vec![0, 1, 2]);
        assert!(res.per_sequence[1].offsets.is_empty());
        assert_eq!(res.per_sequence[2].offsets, vec![2, 6]);
        assert!(res.per_sequence[3].offsets.is_empty());
        assert_eq!(res.match_count, 5);
        assert_eq!(
            res.match_count,
            res.per_sequence.iter().map(|r| r.offsets.len()).sum::<usize>()
        );
        assert_eq!(res.threads_used, 1);
        assert_eq!(res.pattern, "AA");
        assert!(res.execution_time_ms >= 0.0);
    }

    #[test]
    fn parallel_scan_preserves_input_order() {
        let recs: Vec<SequenceRecord> = (0..200)
            .map(|i| {
                let seq: Vec<u8> = b"ACGT".iter().cycle().take(4 + (i % 17) * 4).copied().collect();
                rec(&format!("seq{i}"), &seq)
            })
            .collect();

        let seq_opt = ScanOpt { algorithm: Algorithm::RabinKarp, threads: 1 };
        let par_opt = ScanOpt { algorithm: Algorithm::RabinKarp, threads: 4 };
        let sequential = scan_records(&recs, b"GTAC", &seq_opt);
        let parallel = scan_records(&recs, b"GTAC", &par_opt);

        assert_eq!(parallel.threads_used, 4);
        assert_eq!(parallel.per_sequence, sequential.per_sequence);
        assert_eq!(parallel.match_count, sequential.match_count);
        for (i, r) in parallel.per_sequence.iter().enumerate() {
            assert_eq!(r.label, format!("seq{i}"));
        }
    }

    #[test]
    fn threads_capped_by_record_count() {
        let opt = ScanOpt { algorithm: Algorithm::Kmp, threads: 16 };
        assert_eq!(scan_records(&records(), b"A", &opt).threads_used, 4);

        let opt = ScanOpt { algorithm: Algorithm::Kmp, threads: 0 };
        assert_eq!(scan_records(&records(), b"A", &opt).threads_used, 1);
    }

    #[test]
    fn empty_record_set() {
        let opt = ScanOpt { algorithm: Algorithm::RabinKarp, threads: 8 };
        let res = scan_records(&[], b"ACGT", &opt);
        assert_eq!(res.total_sequences, 0);
        assert_eq!(res.match_count, 0);
        assert_eq!(res.threads_used, 1);
        assert!(res.per_sequence.is_empty());
    }
}
