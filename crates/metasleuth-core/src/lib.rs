/// MetaSleuth Core — parsing, aggregation, outlier analysis, and reporting.
///
/// This crate contains all business logic with zero CLI dependencies.
/// The pipeline runs strictly left to right:
///
/// raw lines → [`parser::InputFormat::detect`] → [`parser::RecordParser`]
/// → [`model::DirectoryIndex`] → [`analysis::find_outliers`] → [`report`].
///
/// # Modules
///
/// - [`model`] — Normalised metadata records and the per-directory index.
/// - [`parser`] — Format detection and the two line parsers (body file, fls).
/// - [`analysis`] — Per-directory mean / population standard deviation and
///   outlier selection.
/// - [`report`] — Text, JSON, and CSV renderers over the analysis output.
/// - [`error`] — Crate error type.
pub mod analysis;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;

pub use error::{MetaSleuthError, Result};
