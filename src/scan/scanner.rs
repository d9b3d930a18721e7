//! Line-oriented pattern scanning.

use crate::patterns::{IssueCategory, Pattern};

use super::Issue;

/// Scan content against a pattern set, producing one record per
/// (line, matching pattern) pair.
///
/// Records are emitted in input line order; a line matching several
/// patterns yields one record per pattern, ordered by the pattern list.
/// Every pattern is tested against every line — matching one pattern does
/// not stop the others. Line numbers are 1-based and refer to the physical
/// line in `content`. Empty content yields an empty sequence.
pub fn scan(content: &str, patterns: &[Pattern], category: &IssueCategory) -> Vec<Issue> {
    let mut records = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        for pattern in patterns {
            if pattern.regex.is_match(line) {
                records.push(Issue {
                    category: category.clone(),
                    line: idx + 1,
                    content: line.trim().to_string(),
                    pattern: Some(pattern.raw.clone()),
                });
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageTag;
    use crate::patterns::PatternRegistry;

    fn debug_patterns(registry: &PatternRegistry, lang: LanguageTag) -> Vec<Pattern> {
        registry
            .patterns_for(&IssueCategory::Debug, Some(lang))
            .to_vec()
    }

    #[test]
    fn test_line_numbers_are_one_based() {
        let registry = PatternRegistry::new();
        let patterns = debug_patterns(&registry, LanguageTag::Python);
        let content = "x = 1\nprint(x)\ny = 2\n";

        let records = scan(content, &patterns, &IssueCategory::Debug);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[0].content, "print(x)");
        assert_eq!(records[0].pattern.as_deref(), Some(r"print\s*\("));
    }

    #[test]
    fn test_record_count_equals_matching_lines_per_pattern() {
        let registry = PatternRegistry::new();
        let patterns = debug_patterns(&registry, LanguageTag::Python);
        let content = "print(1)\nprint(2)\nprint(3)\n";

        let records = scan(content, &patterns, &IssueCategory::Debug);
        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.line).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_multiple_patterns_on_one_line() {
        // A line that is both a pdb import and a set_trace call.
        let registry = PatternRegistry::new();
        let patterns = debug_patterns(&registry, LanguageTag::Python);
        let content = "import pdb; pdb.set_trace()\n";

        let records = scan(content, &patterns, &IssueCategory::Debug);
        assert_eq!(records.len(), 2);
        // Both records point at the same line, ordered by pattern list.
        assert_eq!(records[0].line, 1);
        assert_eq!(records[1].line, 1);
        assert_eq!(records[0].pattern.as_deref(), Some(r"import\s+pdb"));
        assert_eq!(records[1].pattern.as_deref(), Some(r"pdb\.set_trace"));
    }

    #[test]
    fn test_content_is_trimmed() {
        let registry = PatternRegistry::new();
        let patterns = debug_patterns(&registry, LanguageTag::JavaScript);
        let content = "    console.log('x');\n";

        let records = scan(content, &patterns, &IssueCategory::Debug);
        assert_eq!(records[0].content, "console.log('x');");
    }

    #[test]
    fn test_empty_content() {
        let registry = PatternRegistry::new();
        let patterns = debug_patterns(&registry, LanguageTag::Python);
        assert!(scan("", &patterns, &IssueCategory::Debug).is_empty());
    }

    #[test]
    fn test_empty_pattern_set() {
        let registry = PatternRegistry::new();
        let patterns = debug_patterns(&registry, LanguageTag::Ruby);
        assert!(patterns.is_empty());
        assert!(scan("puts 'x'\n", &patterns, &IssueCategory::Debug).is_empty());
    }

    #[test]
    fn test_duplicate_patterns_yield_duplicate_records() {
        let mut registry = PatternRegistry::new();
        registry
            .register(IssueCategory::Todo, r"REVIEW:", None)
            .unwrap();
        registry
            .register(IssueCategory::Todo, r"REVIEW:", None)
            .unwrap();
        let patterns = registry.patterns_for(&IssueCategory::Todo, None).to_vec();

        let records = scan("// REVIEW: twice\n", &patterns, &IssueCategory::Todo);
        assert_eq!(records.len(), 2);
    }
}
