/// Parser module — turns a raw listing into normalised records.
///
/// Provides the two-step front half of the pipeline:
/// - **Format detection:** one peek at the first byte of the stream picks
///   the body file parser (`'0'`, the md5 column of an un-hashed body
///   file) or the fls parser (anything else).
/// - **Line parsing:** the chosen [`RecordParser`] maps every line to a
///   [`LineOutcome`]; [`ingest`] folds those into a [`DirectoryIndex`]
///   and a [`ParseStats`] tally.
///
/// Per-line problems never abort a run. Only I/O failure on the stream
/// itself is an error.
pub mod fls;
pub mod pipe;

use crate::model::{DirectoryIndex, Exclusion, MetadataRecord};
use crate::Result;
use crate::MetaSleuthError;
use serde::Serialize;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, trace};

pub use fls::FlsParser;
pub use pipe::PipeParser;

/// The two supported listing encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// `md5|path|inode|mode|uid|gid|size|atime|mtime|ctime|crtime`
    Body,
    /// `fls -arp` text report.
    Fls,
}

impl InputFormat {
    /// Decide the format from the first byte of the stream.
    ///
    /// Uses `fill_buf`, which does not consume anything, so the parser
    /// that follows still sees the first line. An empty stream is
    /// treated as fls and simply yields no records.
    pub fn detect<R: BufRead>(reader: &mut R) -> std::io::Result<Self> {
        let buf = reader.fill_buf()?;
        Ok(Self::from_first_byte(buf.first().copied()))
    }

    pub fn from_first_byte(byte: Option<u8>) -> Self {
        match byte {
            Some(b'0') => Self::Body,
            _ => Self::Fls,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Body => "body file",
            Self::Fls => "fls report",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a line was rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedLine {
    #[error("expected 11 '|'-separated fields, found {0}")]
    FieldCount(usize),
    #[error("metadata address {0:?} is not a non-negative integer")]
    Address(String),
}

/// Result of parsing a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// An admitted record.
    Record(MetadataRecord),
    /// A well-formed entry that is deliberately left out of the model.
    Excluded(Exclusion),
    /// Not a data line at all (fls headers, blank lines).
    Unmatched,
    /// Looked like a data line but could not be decoded.
    Malformed(MalformedLine),
}

impl LineOutcome {
    pub(crate) fn from_admission(admitted: std::result::Result<MetadataRecord, Exclusion>) -> Self {
        match admitted {
            Ok(record) => Self::Record(record),
            Err(why) => Self::Excluded(why),
        }
    }

    pub(crate) fn malformed_address(raw: &str) -> Self {
        Self::Malformed(MalformedLine::Address(raw.to_owned()))
    }
}

/// A line parser for one of the supported formats, chosen once per run.
#[derive(Debug, Clone)]
pub enum RecordParser {
    Body(PipeParser),
    Fls(FlsParser),
}

impl RecordParser {
    pub fn for_format(format: InputFormat) -> Result<Self> {
        Ok(match format {
            InputFormat::Body => Self::Body(PipeParser),
            InputFormat::Fls => Self::Fls(FlsParser::new()?),
        })
    }

    /// Parse one line with its trailing line terminator already removed.
    pub fn parse(&self, line: &str) -> LineOutcome {
        match self {
            Self::Body(p) => p.parse(line),
            Self::Fls(p) => p.parse(line),
        }
    }
}

/// Running totals for one ingest pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    pub lines_read: u64,
    pub records: u64,
    pub deleted: u64,
    pub zero_address: u64,
    pub self_or_parent: u64,
    pub unmatched: u64,
    pub malformed: u64,
}

impl ParseStats {
    fn tally(&mut self, outcome: &LineOutcome) {
        match outcome {
            LineOutcome::Record(_) => self.records += 1,
            LineOutcome::Excluded(Exclusion::Deleted) => self.deleted += 1,
            LineOutcome::Excluded(Exclusion::ZeroAddress) => self.zero_address += 1,
            LineOutcome::Excluded(Exclusion::SelfOrParent) => self.self_or_parent += 1,
            LineOutcome::Unmatched => self.unmatched += 1,
            LineOutcome::Malformed(_) => self.malformed += 1,
        }
    }

    /// Lines that did not produce a record, for any reason.
    pub fn skipped(&self) -> u64 {
        self.lines_read - self.records
    }
}

/// Everything the aggregation phase produced.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub format: InputFormat,
    pub index: DirectoryIndex,
    pub stats: ParseStats,
}

/// Detect the format, parse every line, and aggregate admitted records.
///
/// Lines are read as raw bytes and decoded lossily so a stray non-UTF-8
/// file name cannot end the run.
pub fn ingest<R: BufRead>(mut reader: R) -> Result<Ingested> {
    let format =
        InputFormat::detect(&mut reader).map_err(|source| MetaSleuthError::Read { line: 1, source })?;
    debug!("Detected input format: {format}");
    let parser = RecordParser::for_format(format)?;

    let mut index = DirectoryIndex::new();
    let mut stats = ParseStats::default();
    let mut buf = Vec::with_capacity(512);

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| MetaSleuthError::Read {
                line: stats.lines_read + 1,
                source,
            })?;
        if n == 0 {
            break;
        }
        stats.lines_read += 1;

        let text = String::from_utf8_lossy(&buf);
        let line = text.trim_end_matches(['\n', '\r']);
        let outcome = parser.parse(line);
        stats.tally(&outcome);

        match outcome {
            LineOutcome::Record(record) => index.insert(record),
            LineOutcome::Malformed(why) => {
                debug!("Skipping malformed line {}: {why}", stats.lines_read);
            }
            LineOutcome::Excluded(why) => {
                trace!("Excluding line {}: {why:?}", stats.lines_read);
            }
            LineOutcome::Unmatched => {}
        }
    }

    Ok(Ingested {
        format,
        index,
        stats,
    })
}

/// Open `path` and [`ingest`] it. The file is closed before returning.
pub fn ingest_path(path: &Path) -> Result<Ingested> {
    let file = File::open(path).map_err(|source| MetaSleuthError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ingest(BufReader::new(file))
}
