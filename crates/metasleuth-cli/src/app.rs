/// Run orchestration: open → ingest → analyse → render.
///
/// The input file is opened once, read to the end through a `BufReader`,
/// and dropped before analysis starts. Only failures to open or read the
/// input (or to write the report) end the run; bad lines are counted.
use crate::args::Args;
use anyhow::Context;
use metasleuth_core::analysis::{find_outliers, AnalysisConfig};
use metasleuth_core::parser::{ingest_path, ParseStats};
use metasleuth_core::report::Report;
use std::io::Write;
use std::time::Instant;
use tracing::{info, warn};

/// Totals for one completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub stats: ParseStats,
    pub directories: usize,
    pub analysed_directories: usize,
    pub flagged_directories: usize,
    pub flagged_files: usize,
}

/// Analyse `args.file` and write the report to `out`.
pub fn run<W: Write>(args: &Args, out: W) -> anyhow::Result<RunSummary> {
    let started = Instant::now();
    let path = &args.file;
    let config = AnalysisConfig::new(args.threshold).context("invalid --devs")?;

    let ingested =
        ingest_path(path).with_context(|| format!("failed to analyse {}", path.display()))?;

    let stats = ingested.stats;
    info!(
        "Read {} lines from {} ({}): {} records in {} directories",
        stats.lines_read,
        path.display(),
        ingested.format,
        stats.records,
        ingested.index.len()
    );
    info!(
        "Skipped {} lines: {} deleted, {} zero address, {} dot entries, {} non-record, {} malformed",
        stats.skipped(),
        stats.deleted,
        stats.zero_address,
        stats.self_or_parent,
        stats.unmatched,
        stats.malformed
    );
    if stats.malformed > 0 {
        warn!(
            "{} malformed lines in {} were skipped (run with -v for line numbers)",
            stats.malformed,
            path.display()
        );
    }

    let directories = find_outliers(&ingested.index, &config);
    let report = Report {
        threshold: config.threshold(),
        input_format: ingested.format,
        stats: &stats,
        directories: &directories,
    };
    report
        .write(args.format.into(), out)
        .context("failed to write report")?;

    let summary = RunSummary {
        stats,
        directories: ingested.index.len(),
        analysed_directories: directories.len(),
        flagged_directories: report.flagged().count(),
        flagged_files: report.finding_count(),
    };
    info!(
        "Flagged {} files in {} of {} analysed directories in {:.2?}",
        summary.flagged_files,
        summary.flagged_directories,
        summary.analysed_directories,
        started.elapsed()
    );
    Ok(summary)
}
