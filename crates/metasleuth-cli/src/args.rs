/// Command-line arguments.
use clap::{ArgAction, Parser, ValueEnum};
use metasleuth_core::analysis::{AnalysisConfig, DEFAULT_THRESHOLD};
use metasleuth_core::report::ReportFormat;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "metasleuth")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find files whose metadata address is an outlier within its directory")]
#[command(long_about = "metasleuth - metadata address outlier finder\n\n\
    Reads a saved `fls -arp` listing or an `fls -m` body file (The Sleuth Kit)\n\
    and, for every directory, compares each file's metadata address (inode or\n\
    MFT entry) with the directory average. Files created together tend to get\n\
    nearby addresses; a file planted later often lands far away.\n\n\
    Examples:\n\
      metasleuth --file fls.txt\n\
      metasleuth --devs 2 --file body.txt --format csv")]
pub struct Args {
    /// Outlier threshold in standard deviations. Higher values shrink the result set.
    #[arg(
        short = 'd',
        long = "devs",
        value_name = "N",
        default_value_t = DEFAULT_THRESHOLD,
        value_parser = parse_threshold
    )]
    pub threshold: f64,

    /// Saved fls -arp output or body file to analyse.
    #[arg(short, long, value_name = "PATH")]
    pub file: PathBuf,

    /// Report encoding written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Maximum log level implied by `-v` / `-q`.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            return tracing::Level::WARN;
        }
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

impl From<OutputFormat> for ReportFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Csv => ReportFormat::Csv,
        }
    }
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{s}` is not a number"))?;
    AnalysisConfig::new(value)
        .map(|c| c.threshold())
        .map_err(|e| e.to_string())
}
