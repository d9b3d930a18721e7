//! Run coordination across a target file list.

use std::path::{Path, PathBuf};

use crate::config::ScanConfig;
use crate::language::{classify, LanguageTag};
use crate::patterns::{IssueCategory, PatternRegistry};
use crate::structure;

use super::analyzer::FileAnalyzer;
use super::duplicates::find_duplicates;
use super::{Issue, RunOptions, RunStatistics, RunSummary};

/// Orchestrates per-file analysis over an externally-supplied file list
/// and accumulates session statistics.
///
/// The registry and exclusion config are owned by the runner for the
/// lifetime of the session; statistics reset only by constructing a new
/// runner. Execution is synchronous and single-threaded: each file is
/// read and scanned to completion before the next begins.
pub struct Runner {
    config: ScanConfig,
    registry: PatternRegistry,
    base_dir: PathBuf,
    stats: RunStatistics,
}

impl Runner {
    pub fn new(config: ScanConfig, registry: PatternRegistry) -> Runner {
        Runner {
            config,
            registry,
            base_dir: PathBuf::from("."),
            stats: RunStatistics::default(),
        }
    }

    /// Set the directory the duplicate scan covers (default: the working
    /// directory).
    pub fn with_base_dir<P: AsRef<Path>>(mut self, dir: P) -> Runner {
        self.base_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Snapshot of the session statistics so far.
    pub fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    /// Analyze every target file and build the run summary.
    ///
    /// Excluded files are dropped before any I/O and never touch the
    /// statistics. When at least one of the debug/todos/unused flags is
    /// set, per-file issues are filtered down to the requested
    /// categories; with no flags set, everything is retained. A run
    /// always completes: per-file failures surface in each result's
    /// `error` field, never as a run-level error.
    pub fn run(&mut self, files: &[PathBuf], options: &RunOptions) -> RunSummary {
        let analyzer = FileAnalyzer::new(&self.registry);
        let mut details = Vec::new();

        for path in files {
            if self.config.is_excluded(&path.to_string_lossy()) {
                continue;
            }
            if let Some(filter) = options.language_filter {
                if classify(path) != filter {
                    continue;
                }
            }

            let mut result = analyzer.analyze(path);

            if options.has_category_filter() {
                result.issues.retain(|issue| {
                    (options.include_debug && issue.category == IssueCategory::Debug)
                        || (options.include_todos && issue.category == IssueCategory::Todo)
                });
            }

            if options.include_unused_imports && result.language == LanguageTag::Python {
                for name in structure::find_unused_imports(path) {
                    result.issues.push(Issue {
                        category: IssueCategory::UnusedImport,
                        line: 0,
                        content: format!("Unused import: {}", name),
                        pattern: None,
                    });
                }
            }

            if result.error.is_none() {
                self.stats.record_file(&result);
            }
            details.push(result);
        }

        let duplicates = if options.include_duplicates {
            let pairs = find_duplicates(&self.base_dir);
            self.stats.record_duplicates(pairs.len());
            Some(pairs)
        } else {
            None
        };

        RunSummary {
            files_analyzed: details.len(),
            issues_found: details.iter().map(|d| d.issues.len()).sum(),
            issues_fixed: 0,
            details,
            duplicates,
            summary: self.stats.clone(),
        }
    }
}
