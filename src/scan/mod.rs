//! Scanning engine: per-file analysis, duplicate detection, run
//! coordination.

mod analyzer;
mod duplicates;
mod runner;
mod scanner;
mod types;

pub use analyzer::FileAnalyzer;
pub use duplicates::find_duplicates;
pub use runner::Runner;
pub use scanner::scan;
pub use types::{
    AnalysisError, DuplicateKind, DuplicatePair, FileAnalysisResult, Issue, Metrics, RunOptions,
    RunStatistics, RunSummary, StructureMetrics,
};
