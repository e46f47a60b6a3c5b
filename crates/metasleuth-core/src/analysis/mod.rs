/// Analysis modules — statistics over the aggregated directory index.

pub mod outliers;

pub use outliers::{
    find_outliers, AnalysisConfig, DirectoryOutliers, DirectoryStats, OutlierFinding,
    DEFAULT_THRESHOLD,
};
