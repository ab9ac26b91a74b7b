use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use seqscan::{report, AggregateResult, EngineError, SearchRequest};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "seqscan", author, version, about = "Exact DNA pattern search over a labeled sequence set")]
struct Cli {
    /// Matching algorithm: kmp | rabin_karp
    #[arg(short, long)]
    algorithm: Option<String>,
    /// Pattern to search for (case-insensitive)
    #[arg(short, long)]
    pattern: Option<String>,
    /// Record set: one `label,sequence` row per line, header optional
    #[arg(short = 'c', long = "csv", visible_alias = "records")]
    csv: Option<PathBuf>,
    /// Number of matching workers
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    threads: usize,
    /// Output JSON path (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Enable verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_request(self) -> SearchRequest {
        SearchRequest {
            algorithm: self.algorithm,
            pattern: self.pattern,
            records: self.csv,
            threads: self.threads,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            init_logging(false);
            let msg = e.to_string();
            let msg = msg.lines().next().unwrap_or_default().trim_start_matches("error: ");
            return finish(Err(EngineError::Usage(msg.to_string())), None);
        }
    };

    init_logging(cli.verbose);
    let out = cli.out.clone();
    finish(seqscan::execute(cli.into_request()), out.as_deref())
}

fn init_logging(verbose: bool) {
    // RUST_LOG 优先
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("seqscan=debug,info")
        } else {
            EnvFilter::new("seqscan=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Emit exactly one payload and map the outcome to an exit status.
fn finish(outcome: Result<AggregateResult, EngineError>, out: Option<&Path>) -> ExitCode {
    let (payload, code) = match &outcome {
        Ok(result) => (report::encode_success(result), 0),
        Err(e) => {
            error!("{e}");
            (report::encode_failure(e), e.exit_code())
        }
    };

    match payload.context("cannot encode payload").and_then(|p| emit(&p, out)) {
        Ok(()) => ExitCode::from(code),
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn emit(payload: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            let fh = File::create(path)
                .with_context(|| format!("cannot create output '{}'", path.display()))?;
            report::write_payload(BufWriter::new(fh), payload)
                .with_context(|| format!("cannot write output '{}'", path.display()))
        }
        None => report::write_payload(std::io::stdout().lock(), payload)
            .context("cannot write payload to stdout"),
    }
}
