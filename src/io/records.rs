use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::EngineError;
use crate::util::dna;

pub const DELIMITER: char = ',';

/// 首行第一列以这些词开头（且其后不是字母数字）时视为表头
const HEADER_TOKENS: &[&str] = &["name", "id", "identifier", "label", "nombre", "sample", "header"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub label: String,
    /// 大写且仅含 A/C/G/T，非空
    pub seq: Vec<u8>,
}

/// Reads `label,sequence` rows one at a time.
///
/// Row numbers in errors are 1-based and count every physical line of the
/// source, including a skipped header and blank lines. The first error ends
/// the stream; to start over, open the source again.
pub struct RecordReader<R: BufRead> {
    reader: R,
    source: PathBuf,
    buf: Vec<u8>,
    row: usize,
    header_checked: bool,
    done: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_source(reader, "<input>")
    }

    /// `source` is only used to name the input in read errors.
    pub fn with_source(reader: R, source: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            source: source.into(),
            buf: Vec::new(),
            row: 0,
            header_checked: false,
            done: false,
        }
    }

    pub fn next_record(&mut self) -> Result<Option<SequenceRecord>, EngineError> {
        if self.done {
            return Ok(None);
        }

        loop {
            self.buf.clear();
            let n = match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(n) => n,
                Err(e) => {
                    self.done = true;
                    return Err(EngineError::unreadable(&self.source, e));
                }
            };
            if n == 0 {
                self.done = true;
                return Ok(None);
            }
            self.row += 1;

            let text = String::from_utf8_lossy(&self.buf);
            let line = text.trim_start_matches('\u{feff}').trim();
            if line.is_empty() {
                debug!(row = self.row, "skipping blank line");
                continue;
            }

            if !self.header_checked {
                self.header_checked = true;
                let first = line.split(DELIMITER).next().unwrap_or("");
                if is_header(first) {
                    debug!(row = self.row, header = line, "skipping header row");
                    continue;
                }
            }

            let parsed = parse_row(line, self.row);
            if parsed.is_err() {
                self.done = true;
            }
            return parsed.map(Some);
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = Result<SequenceRecord, EngineError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Open a record set on disk.
///
/// # Errors
///
/// Returns `EngineError::SourceUnreadable` if the file cannot be opened.
pub fn open_records(path: &Path) -> Result<RecordReader<BufReader<File>>, EngineError> {
    let fh = File::open(path).map_err(|e| EngineError::unreadable(path, e))?;
    Ok(RecordReader::with_source(BufReader::new(fh), path))
}

/// Parse every record of a record set; the first invalid row aborts the load.
///
/// # Errors
///
/// Returns `SourceUnreadable` for I/O failures, `MalformedRecord` or
/// `InvalidAlphabet` for the first offending row.
pub fn load_records(path: &Path) -> Result<Vec<SequenceRecord>, EngineError> {
    open_records(path)?.collect()
}

fn is_header(first_field: &str) -> bool {
    let field = first_field.trim().to_ascii_lowercase();
    HEADER_TOKENS.iter().any(|token| {
        field
            .strip_prefix(token)
            .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_alphanumeric()))
    })
}

fn parse_row(line: &str, row: usize) -> Result<SequenceRecord, EngineError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != 2 {
        return Err(EngineError::MalformedRecord {
            row,
            detail: format!("expected 2 fields (label,sequence), found {}", fields.len()),
        });
    }

    let label = fields[0].trim();
    if label.is_empty() {
        return Err(EngineError::MalformedRecord { row, detail: "empty label".to_string() });
    }

    let raw = fields[1].trim();
    if raw.is_empty() {
        return Err(EngineError::InvalidAlphabet {
            row,
            detail: format!("empty sequence for '{label}'"),
        });
    }

    let mut seq = raw.as_bytes().to_vec();
    dna::normalize_seq(&mut seq);
    if let Some((pos, _)) = dna::find_invalid_base(&seq) {
        // 之前的字节都是 ASCII 碱基，所以 pos 一定落在字符边界上
        let ch = raw.get(pos..).and_then(|s| s.chars().next()).unwrap_or('?');
        return Err(EngineError::InvalidAlphabet {
            row,
            detail: format!("character {ch:?} at position {pos} of '{label}' is not one of A, C, G, T"),
        });
    }

    Ok(SequenceRecord { label: label.to_string(), seq })
}
