/// MetaSleuth CLI — argument surface and run orchestration.
///
/// This crate contains no analysis code. Business logic lives in
/// `metasleuth-core`; this layer opens the input, wires the pipeline
/// together, and logs what happened.
pub mod app;
pub mod args;

pub use app::{run, RunSummary};
pub use args::{Args, OutputFormat};
