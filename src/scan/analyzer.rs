//! Per-file analysis: classification, pattern scanning, metrics.

use std::fs;
use std::path::Path;

use crate::language::{classify, comment_line_regex, LanguageTag};
use crate::patterns::{IssueCategory, PatternRegistry};
use crate::structure;

use super::scanner::scan;
use super::{AnalysisError, FileAnalysisResult, Issue, Metrics};

/// Analyzes one file at a time against a shared pattern registry.
///
/// The registry is borrowed, not owned: it belongs to the session that
/// constructed it, and one registry serves every analyzer.
pub struct FileAnalyzer<'a> {
    registry: &'a PatternRegistry,
}

impl<'a> FileAnalyzer<'a> {
    pub fn new(registry: &'a PatternRegistry) -> FileAnalyzer<'a> {
        FileAnalyzer { registry }
    }

    /// Analyze a single file.
    ///
    /// Never fails: a missing file, unreadable content, or unparsable
    /// syntax all degrade to a populated-but-partial result whose `error`
    /// field carries the reason. Issues are ordered debug first, then
    /// TODO markers, each in line order.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> FileAnalysisResult {
        let path = path.as_ref();
        let path_str = path.to_string_lossy().to_string();

        if !path.exists() {
            return FileAnalysisResult::not_found(path_str);
        }

        let language = classify(path);
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                return FileAnalysisResult::read_failed(
                    path_str,
                    language,
                    AnalysisError::Read(e.to_string()),
                )
            }
        };

        let mut issues = scan(
            &content,
            self.registry.patterns_for(&IssueCategory::Debug, Some(language)),
            &IssueCategory::Debug,
        );
        issues.extend(scan(
            &content,
            self.registry.patterns_for(&IssueCategory::Todo, None),
            &IssueCategory::Todo,
        ));

        let metrics = compute_metrics(&content, language, &issues);

        // Secondary structural block, reference language only. A parse
        // failure omits the block; it is not an error for the result.
        let structure = if language == LanguageTag::Python {
            structure::file_structure(&content).ok()
        } else {
            None
        };

        FileAnalysisResult {
            path: path_str,
            language,
            issues,
            metrics,
            structure,
            error: None,
        }
    }
}

fn compute_metrics(content: &str, language: LanguageTag, issues: &[Issue]) -> Metrics {
    let comment_regex = comment_line_regex(language);

    let mut metrics = Metrics::default();
    for line in content.lines() {
        metrics.total_lines += 1;
        if line.trim().is_empty() {
            metrics.blank_lines += 1;
        }
        if let Some(re) = comment_regex {
            if re.is_match(line) {
                metrics.comment_lines += 1;
            }
        }
    }

    metrics.debug_statements = issues
        .iter()
        .filter(|i| i.category == IssueCategory::Debug)
        .count();
    metrics.todos = issues
        .iter()
        .filter(|i| i.category == IssueCategory::Todo)
        .count();

    metrics
}
