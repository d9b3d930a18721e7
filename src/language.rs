//! Language classification from file extensions.

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A supported source language.
///
/// Derived solely from the file extension; a path never changes language
/// mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Python,
    JavaScript,
    Go,
    Java,
    Ruby,
    Php,
    C,
    Cpp,
    CSharp,
    Rust,
    Unknown,
}

/// Extension (lowercase, no dot) to language table.
static EXTENSION_LANGUAGES: phf::Map<&'static str, LanguageTag> = phf::phf_map! {
    "py" => LanguageTag::Python,
    "js" => LanguageTag::JavaScript,
    "jsx" => LanguageTag::JavaScript,
    "ts" => LanguageTag::JavaScript,
    "tsx" => LanguageTag::JavaScript,
    "go" => LanguageTag::Go,
    "java" => LanguageTag::Java,
    "rb" => LanguageTag::Ruby,
    "php" => LanguageTag::Php,
    "c" => LanguageTag::C,
    "cpp" => LanguageTag::Cpp,
    "cs" => LanguageTag::CSharp,
    "rs" => LanguageTag::Rust,
};

impl LanguageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Python => "python",
            LanguageTag::JavaScript => "javascript",
            LanguageTag::Go => "go",
            LanguageTag::Java => "java",
            LanguageTag::Ruby => "ruby",
            LanguageTag::Php => "php",
            LanguageTag::C => "c",
            LanguageTag::Cpp => "cpp",
            LanguageTag::CSharp => "csharp",
            LanguageTag::Rust => "rust",
            LanguageTag::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LanguageTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "python" => Ok(LanguageTag::Python),
            "javascript" => Ok(LanguageTag::JavaScript),
            "go" => Ok(LanguageTag::Go),
            "java" => Ok(LanguageTag::Java),
            "ruby" => Ok(LanguageTag::Ruby),
            "php" => Ok(LanguageTag::Php),
            "c" => Ok(LanguageTag::C),
            "cpp" => Ok(LanguageTag::Cpp),
            "csharp" => Ok(LanguageTag::CSharp),
            "rust" => Ok(LanguageTag::Rust),
            "unknown" => Ok(LanguageTag::Unknown),
            _ => Err(format!("unknown language: {}", s)),
        }
    }
}

/// Classify a path by its extension.
///
/// Total function: unrecognized or missing extensions map to
/// `LanguageTag::Unknown`. Comparison is case-insensitive and the path
/// does not need to exist.
pub fn classify<P: AsRef<Path>>(path: P) -> LanguageTag {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(|e| EXTENSION_LANGUAGES.get(e.to_ascii_lowercase().as_str()))
        .copied()
        .unwrap_or(LanguageTag::Unknown)
}

/// Whether the path carries a recognized source extension.
pub fn is_code_file<P: AsRef<Path>>(path: P) -> bool {
    classify(path) != LanguageTag::Unknown
}

lazy_static! {
    static ref HASH_COMMENT: Regex = Regex::new(r"^\s*#").unwrap();
    static ref SLASH_COMMENT: Regex = Regex::new(r"^\s*//").unwrap();
    static ref BLOCK_COMMENT: Regex = Regex::new(r"^\s*(//|/\*|\*)").unwrap();
}

/// Regex matching a comment line for the language, tested against the
/// whole line (leading whitespace allowed).
///
/// Languages without a defined comment style return `None`; their comment
/// line count is always zero.
pub fn comment_line_regex(language: LanguageTag) -> Option<&'static Regex> {
    match language {
        LanguageTag::Python => Some(&HASH_COMMENT),
        LanguageTag::JavaScript => Some(&BLOCK_COMMENT),
        LanguageTag::Go => Some(&SLASH_COMMENT),
        LanguageTag::Java => Some(&BLOCK_COMMENT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_extensions() {
        assert_eq!(classify("app.py"), LanguageTag::Python);
        assert_eq!(classify("src/index.ts"), LanguageTag::JavaScript);
        assert_eq!(classify("main.go"), LanguageTag::Go);
        assert_eq!(classify("Server.java"), LanguageTag::Java);
        assert_eq!(classify("tool.rb"), LanguageTag::Ruby);
        assert_eq!(classify("lib.rs"), LanguageTag::Rust);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("LEGACY.PY"), LanguageTag::Python);
        assert_eq!(classify("App.Js"), LanguageTag::JavaScript);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(classify("README.md"), LanguageTag::Unknown);
        assert_eq!(classify("Makefile"), LanguageTag::Unknown);
        assert_eq!(classify(""), LanguageTag::Unknown);
    }

    #[test]
    fn test_classify_is_deterministic() {
        // Same extension always yields the same tag.
        assert_eq!(classify("a/b/one.py"), classify("c/two.py"));
    }

    #[test]
    fn test_comment_line_regex() {
        let py = comment_line_regex(LanguageTag::Python).unwrap();
        assert!(py.is_match("  # comment"));
        assert!(!py.is_match("x = 1  # trailing"));

        let js = comment_line_regex(LanguageTag::JavaScript).unwrap();
        assert!(js.is_match("// comment"));
        assert!(js.is_match(" * doc continuation"));

        assert!(comment_line_regex(LanguageTag::Ruby).is_none());
        assert!(comment_line_regex(LanguageTag::Unknown).is_none());
    }
}
