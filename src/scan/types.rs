//! Core types for scan results.

use serde::Serialize;
use thiserror::Error;

use crate::language::LanguageTag;
use crate::patterns::IssueCategory;

/// Why a single file could not be (fully) analyzed.
///
/// Nothing here is fatal: every variant degrades to a partial per-file
/// result and the run continues with the next file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("File not found")]
    NotFound,
    /// I/O or decoding failure while reading file content.
    #[error("{0}")]
    Read(String),
    /// Syntax-tree construction failed; structural analysis is skipped.
    #[error("parse failed: {0}")]
    Parse(String),
}

/// A single detected issue attached to a location.
///
/// `line` is 1-based; 0 marks a whole-file finding (e.g. an unused
/// import). `pattern` is the matching regex text for scanner-produced
/// records and absent for structural findings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub category: IssueCategory,
    pub line: usize,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Per-file line and issue counts. Derived once per analysis; read-only
/// afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub total_lines: usize,
    pub blank_lines: usize,
    pub comment_lines: usize,
    pub debug_statements: usize,
    pub todos: usize,
}

/// Secondary structural counts, computed only for the reference language
/// (Python) when its syntax tree parses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StructureMetrics {
    pub classes: usize,
    pub functions: usize,
    pub imports: usize,
}

/// The complete outcome of analyzing one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileAnalysisResult {
    pub path: String,
    pub language: LanguageTag,
    pub issues: Vec<Issue>,
    pub metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileAnalysisResult {
    /// Result for a path that does not exist. No content was read, so the
    /// language stays `Unknown`.
    pub fn not_found(path: String) -> FileAnalysisResult {
        FileAnalysisResult {
            path,
            language: LanguageTag::Unknown,
            issues: Vec::new(),
            metrics: Metrics::default(),
            structure: None,
            error: Some(AnalysisError::NotFound.to_string()),
        }
    }

    /// Result for a file whose content could not be read.
    pub fn read_failed(path: String, language: LanguageTag, err: AnalysisError) -> FileAnalysisResult {
        FileAnalysisResult {
            path,
            language,
            issues: Vec::new(),
            metrics: Metrics::default(),
            structure: None,
            error: Some(err.to_string()),
        }
    }

    /// Number of issues in the given category.
    pub fn category_count(&self, category: &IssueCategory) -> usize {
        self.issues.iter().filter(|i| &i.category == category).count()
    }
}

/// Relation between two files reported by the duplicate detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateKind {
    ExactDuplicate,
}

/// Two files with identical content. The first-seen file is the
/// canonical original and is never itself reported as a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicatePair {
    pub original: String,
    pub duplicate: String,
    pub relation: DuplicateKind,
}

/// Process-wide accumulator for a scan session.
///
/// Counts only ever increase; a fresh session starts from zero.
/// `issues_fixed` stays 0 — the engine reports, it does not rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
    pub files_processed: usize,
    pub issues_found: usize,
    pub issues_fixed: usize,
    pub debug_statements: usize,
    pub todos: usize,
    pub duplicates: usize,
}

impl RunStatistics {
    /// Fold one analyzed file into the session totals.
    pub fn record_file(&mut self, result: &FileAnalysisResult) {
        self.files_processed += 1;
        self.issues_found += result.issues.len();
        self.debug_statements += result.category_count(&IssueCategory::Debug);
        self.todos += result.category_count(&IssueCategory::Todo);
    }

    pub fn record_duplicates(&mut self, count: usize) {
        self.duplicates += count;
    }
}

/// Feature selection for a run.
///
/// When none of the category flags (`include_debug`, `include_todos`,
/// `include_unused_imports`) is set, every category is retained
/// unfiltered.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub include_debug: bool,
    pub include_todos: bool,
    pub include_duplicates: bool,
    pub include_unused_imports: bool,
    pub language_filter: Option<LanguageTag>,
}

impl RunOptions {
    pub fn has_category_filter(&self) -> bool {
        self.include_debug || self.include_todos || self.include_unused_imports
    }
}

/// The outcome of a whole run, handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub files_analyzed: usize,
    pub issues_found: usize,
    pub issues_fixed: usize,
    pub details: Vec<FileAnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicates: Option<Vec<DuplicatePair>>,
    pub summary: RunStatistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let result = FileAnalysisResult::not_found("missing.py".to_string());
        assert_eq!(result.error.as_deref(), Some("File not found"));
        assert_eq!(result.language, LanguageTag::Unknown);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn test_statistics_accumulate_monotonically() {
        let mut stats = RunStatistics::default();
        let mut result = FileAnalysisResult::not_found("x.py".to_string());
        result.error = None;
        result.issues.push(Issue {
            category: IssueCategory::Debug,
            line: 1,
            content: "print(1)".to_string(),
            pattern: Some(r"print\s*\(".to_string()),
        });

        stats.record_file(&result);
        stats.record_file(&result);
        assert_eq!(stats.files_processed, 2);
        assert_eq!(stats.issues_found, 2);
        assert_eq!(stats.debug_statements, 2);
        assert_eq!(stats.todos, 0);
        assert_eq!(stats.issues_fixed, 0);
    }

    #[test]
    fn test_category_filter_detection() {
        assert!(!RunOptions::default().has_category_filter());
        let opts = RunOptions {
            include_unused_imports: true,
            ..Default::default()
        };
        assert!(opts.has_category_filter());
        let opts = RunOptions {
            include_duplicates: true,
            ..Default::default()
        };
        // Duplicates are a separate scan, not an issue-list filter.
        assert!(!opts.has_category_filter());
    }
}
