//! Issue categories and the pattern registry.
//!
//! The registry owns every regex the line scanner runs: per-language debug
//! patterns, language-independent TODO-marker patterns, and any custom
//! categories registered at startup. It is seeded with a fixed default set
//! at construction and only ever grows; there is no removal operation, and
//! registering the same pattern twice is allowed (and yields duplicate
//! matches downstream).

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::language::LanguageTag;

/// Classification of a detected issue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueCategory {
    Debug,
    Todo,
    UnusedImport,
    ExactDuplicate,
    /// Escape hatch for caller-defined categories; the string is the
    /// category identifier.
    Custom(String),
}

impl IssueCategory {
    pub fn as_str(&self) -> &str {
        match self {
            IssueCategory::Debug => "debug",
            IssueCategory::Todo => "todo",
            IssueCategory::UnusedImport => "unused_import",
            IssueCategory::ExactDuplicate => "exact_duplicate",
            IssueCategory::Custom(name) => name,
        }
    }

    /// Parse a category identifier. Total: unrecognized identifiers become
    /// `Custom`.
    pub fn parse(s: &str) -> IssueCategory {
        match s {
            "debug" => IssueCategory::Debug,
            "todo" => IssueCategory::Todo,
            "unused_import" => IssueCategory::UnusedImport,
            "exact_duplicate" => IssueCategory::ExactDuplicate,
            other => IssueCategory::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for IssueCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for IssueCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(IssueCategory::parse(&s))
    }
}

/// A single registered pattern: the source text plus its compiled form.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub raw: String,
    pub regex: Regex,
}

impl Pattern {
    /// Compile a pattern. All patterns match case-insensitively and as a
    /// substring search, not a full-line match.
    pub fn compile(text: &str) -> Result<Pattern, regex::Error> {
        let regex = RegexBuilder::new(text).case_insensitive(true).build()?;
        Ok(Pattern {
            raw: text.to_string(),
            regex,
        })
    }
}

/// Default debug patterns per language.
const PYTHON_DEBUG: &[&str] = &[
    r"print\s*\(",
    r"breakpoint\s*\(\)",
    r"import\s+pdb",
    r"pdb\.set_trace",
    r"import\s+ipdb",
    r"ipdb\.set_trace",
];

const JAVASCRIPT_DEBUG: &[&str] = &[
    r"console\.(log|debug|info|warn|error)",
    r"debugger\s*;",
    r"alert\s*\(",
];

const GO_DEBUG: &[&str] = &[r"fmt\.Print", r"log\.Print", r"println\("];

/// Default TODO-marker patterns, shared across all languages. Covers the
/// `#`, `//` and `/* */` comment styles.
const TODO_MARKERS: &[&str] = &[
    r"#\s*(TODO|FIXME|XXX|HACK|NOTE):",
    r"//\s*(TODO|FIXME|XXX|HACK|NOTE):",
    r"/\*\s*(TODO|FIXME|XXX|HACK|NOTE):",
];

#[derive(Debug, Default)]
struct CustomBucket {
    shared: Vec<Pattern>,
    by_language: HashMap<LanguageTag, Vec<Pattern>>,
}

/// Registry of scan patterns, keyed by category and (for debug and custom
/// categories) language.
///
/// Intended lifecycle: construct and register custom patterns during
/// single-threaded startup, then share immutably with the scanning code.
#[derive(Debug)]
pub struct PatternRegistry {
    debug: HashMap<LanguageTag, Vec<Pattern>>,
    todo: Vec<Pattern>,
    custom: HashMap<String, CustomBucket>,
}

impl PatternRegistry {
    /// Build a registry seeded with the default debug and TODO patterns.
    pub fn new() -> PatternRegistry {
        let mut debug = HashMap::new();
        debug.insert(LanguageTag::Python, compile_defaults(PYTHON_DEBUG));
        debug.insert(LanguageTag::JavaScript, compile_defaults(JAVASCRIPT_DEBUG));
        debug.insert(LanguageTag::Go, compile_defaults(GO_DEBUG));

        PatternRegistry {
            debug,
            todo: compile_defaults(TODO_MARKERS),
            custom: HashMap::new(),
        }
    }

    /// Patterns for a category.
    ///
    /// - `Debug` is keyed by language; a missing or unseeded language
    ///   yields an empty slice.
    /// - `Todo` ignores the language entirely (one shared list).
    /// - Other categories resolve to the language-specific bucket when a
    ///   language is given, else to the category's shared bucket.
    pub fn patterns_for(
        &self,
        category: &IssueCategory,
        language: Option<LanguageTag>,
    ) -> &[Pattern] {
        match category {
            IssueCategory::Debug => language
                .and_then(|l| self.debug.get(&l))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
            IssueCategory::Todo => &self.todo,
            other => self
                .custom
                .get(other.as_str())
                .map(|bucket| match language {
                    Some(l) => bucket
                        .by_language
                        .get(&l)
                        .map(Vec::as_slice)
                        .unwrap_or(&[]),
                    None => bucket.shared.as_slice(),
                })
                .unwrap_or(&[]),
        }
    }

    /// Append a pattern to the relevant bucket, creating the bucket if the
    /// category is new. Duplicate pattern strings are appended again, not
    /// deduplicated.
    ///
    /// A `Debug` registration without a language lands in the `Unknown`
    /// bucket and applies to files with unrecognized extensions.
    pub fn register(
        &mut self,
        category: IssueCategory,
        pattern: &str,
        language: Option<LanguageTag>,
    ) -> Result<(), regex::Error> {
        let compiled = Pattern::compile(pattern)?;
        match category {
            IssueCategory::Debug => {
                let lang = language.unwrap_or(LanguageTag::Unknown);
                self.debug.entry(lang).or_default().push(compiled);
            }
            IssueCategory::Todo => self.todo.push(compiled),
            other => {
                let bucket = self.custom.entry(other.as_str().to_string()).or_default();
                match language {
                    Some(lang) => bucket.by_language.entry(lang).or_default().push(compiled),
                    None => bucket.shared.push(compiled),
                }
            }
        }
        Ok(())
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        PatternRegistry::new()
    }
}

fn compile_defaults(patterns: &[&str]) -> Vec<Pattern> {
    patterns
        .iter()
        .map(|p| Pattern::compile(p).expect("built-in pattern must compile"))
        .collect()
}
