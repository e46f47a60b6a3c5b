/// Report rendering — pure formatting over the analyzer's output.
///
/// Three encodings are supported:
/// - **Text** (default): the fixed-width listing forensic examiners diff
///   between runs. Only directories with at least one finding get a
///   header, and the banner is always printed.
/// - **JSON**: one document with the threshold, parse totals, and the
///   flagged directories.
/// - **CSV**: one row per flagged file.
use crate::analysis::{DirectoryOutliers, OutlierFinding};
use crate::parser::{InputFormat, ParseStats};
use crate::Result;
use serde::Serialize;
use std::io::Write;

/// Width of the `=` divider under the text banner.
pub const DIVIDER_WIDTH: usize = 85;

/// Output encoding for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Everything a renderer needs about one run.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub threshold: f64,
    pub input_format: InputFormat,
    pub stats: &'a ParseStats,
    pub directories: &'a [DirectoryOutliers],
}

impl<'a> Report<'a> {
    /// Directories with at least one finding, in analysis order.
    pub fn flagged(&self) -> impl Iterator<Item = &'a DirectoryOutliers> {
        self.directories.iter().filter(|d| d.is_flagged())
    }

    /// Total number of flagged files.
    pub fn finding_count(&self) -> usize {
        self.directories.iter().map(|d| d.findings.len()).sum()
    }

    pub fn write<W: Write>(&self, format: ReportFormat, out: W) -> Result<()> {
        match format {
            ReportFormat::Text => self.write_text(out),
            ReportFormat::Json => self.write_json(out),
            ReportFormat::Csv => self.write_csv(out),
        }
    }

    pub fn write_text<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(out, "{}", banner(self.threshold))?;
        writeln!(out, "{}", "=".repeat(DIVIDER_WIDTH))?;
        for dir in self.flagged() {
            writeln!(out)?;
            writeln!(out, "{}", directory_line(dir))?;
            for finding in &dir.findings {
                writeln!(out, "{}", finding_line(finding))?;
            }
        }
        out.flush()?;
        Ok(())
    }

    pub fn write_json<W: Write>(&self, mut out: W) -> Result<()> {
        #[derive(Serialize)]
        struct JsonReport<'r> {
            threshold: f64,
            input_format: InputFormat,
            stats: &'r ParseStats,
            directories: Vec<&'r DirectoryOutliers>,
        }

        let doc = JsonReport {
            threshold: self.threshold,
            input_format: self.input_format,
            stats: self.stats,
            directories: self.flagged().collect(),
        };
        serde_json::to_writer_pretty(&mut out, &doc)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }

    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        #[derive(Serialize)]
        struct CsvRow<'r> {
            path: &'r str,
            mean: f64,
            std_dev: f64,
            file: &'r str,
            address: u64,
            deviation: f64,
        }

        let mut wtr = csv::Writer::from_writer(out);
        let mut wrote_row = false;
        for dir in self.flagged() {
            for f in &dir.findings {
                wtr.serialize(CsvRow {
                    path: &dir.path,
                    mean: dir.stats.mean,
                    std_dev: dir.stats.std_dev,
                    file: f.name.as_str(),
                    address: f.address,
                    deviation: f.deviation,
                })?;
                wrote_row = true;
            }
        }
        // serde only emits headers alongside the first row.
        if !wrote_row {
            wtr.write_record(["path", "mean", "std_dev", "file", "address", "deviation"])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// First line of the text report.
pub fn banner(threshold: f64) -> String {
    format!(
        "Metadata address outliers that are {threshold:.2} standard deviations from their path average."
    )
}

/// Directory header. The average is printed as its integer part.
pub fn directory_line(dir: &DirectoryOutliers) -> String {
    format!(
        "Path Meta Addr Avg: {:10} -- Std. Dev.: {:12.2} -- Path: {}",
        dir.stats.mean.trunc() as u64,
        dir.stats.std_dev,
        dir.path
    )
}

pub fn finding_line(f: &OutlierFinding) -> String {
    format!(
        "    File Meta Addr: {:10} --      Dev.: {:12.2} -- File:   {}",
        f.address, f.deviation, f.name
    )
}
