/// Metadata address outlier detection.
///
/// Files created together on a volume tend to receive metadata addresses
/// in a narrow band. For every directory holding more than one file this
/// module computes the mean and the *population* standard deviation of the
/// addresses, then flags each file whose absolute deviation from the mean
/// is strictly greater than `threshold × std_dev`.
///
/// All arithmetic is `f64`. Addresses are summed in `u128` first so the
/// mean of very large MFT numbers cannot overflow.
use crate::model::{DirectoryGroup, DirectoryIndex};
use crate::{MetaSleuthError, Result};
use compact_str::CompactString;
use serde::Serialize;

/// Default outlier threshold, in standard deviations.
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Validated analysis settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    threshold: f64,
}

impl AnalysisConfig {
    /// Create a config, rejecting negative, NaN, or infinite thresholds.
    pub fn new(threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(MetaSleuthError::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Mean and population standard deviation of one directory's addresses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DirectoryStats {
    pub file_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    /// Exact sum of the addresses.
    #[serde(skip)]
    pub(crate) total: u128,
}

impl DirectoryStats {
    /// Statistics for a group, or `None` when it holds fewer than two
    /// files (a deviation over one sample says nothing).
    ///
    /// Deviations are taken from the exact integer `n·a − Σa` before any
    /// rounding, so addresses above 2^53 still give exact zero variance
    /// for identical values.
    pub fn compute(group: &DirectoryGroup) -> Option<Self> {
        let n = group.file_count();
        if n <= 1 {
            return None;
        }

        let total: u128 = group.files.values().map(|&a| u128::from(a)).sum();
        let mut stats = Self {
            file_count: n,
            mean: total as f64 / n as f64,
            std_dev: 0.0,
            total,
        };

        let min = group.files.values().min();
        let max = group.files.values().max();
        if min == max {
            return Some(stats);
        }

        let sum_sq: f64 = group
            .files
            .values()
            .map(|&a| {
                let d = stats.deviation(a);
                d * d
            })
            .sum();
        stats.std_dev = (sum_sq / n as f64).sqrt();
        Some(stats)
    }

    /// Signed deviation of `address` from the mean.
    pub fn deviation(&self, address: u64) -> f64 {
        let n = self.file_count as i128;
        let scaled = n * i128::from(address) - self.total as i128;
        scaled as f64 / n as f64
    }
}

/// One flagged file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlierFinding {
    pub name: CompactString,
    pub address: u64,
    /// `address − mean`, signed.
    pub deviation: f64,
}

/// Analysis result for one eligible directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryOutliers {
    pub path: String,
    #[serde(flatten)]
    pub stats: DirectoryStats,
    /// Flagged files in ascending name order. May be empty.
    pub findings: Vec<OutlierFinding>,
}

impl DirectoryOutliers {
    /// `true` if at least one file in the directory was flagged.
    #[inline]
    pub fn is_flagged(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Analyse every directory with more than one file.
///
/// Output is ordered by directory path, and findings within a directory
/// by file name, both ascending. Directories with no outliers are still
/// returned (with empty `findings`) so callers can report coverage.
pub fn find_outliers(index: &DirectoryIndex, config: &AnalysisConfig) -> Vec<DirectoryOutliers> {
    index
        .iter()
        .filter_map(|(path, group)| analyse_directory(path, group, config.threshold))
        .collect()
}

fn analyse_directory(path: &str, group: &DirectoryGroup, threshold: f64) -> Option<DirectoryOutliers> {
    let stats = DirectoryStats::compute(group)?;

    // All addresses identical: nothing can deviate, whatever the threshold.
    let findings = if stats.std_dev == 0.0 {
        Vec::new()
    } else {
        let limit = threshold * stats.std_dev;
        group
            .files
            .iter()
            .filter_map(|(name, &address)| {
                let deviation = stats.deviation(address);
                (deviation.abs() > limit).then(|| OutlierFinding {
                    name: name.clone(),
                    address,
                    deviation,
                })
            })
            .collect()
    };

    Some(DirectoryOutliers {
        path: path.to_owned(),
        stats,
        findings,
    })
}
