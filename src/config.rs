//! Scan configuration: exclusion rules and optional YAML config files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::language::LanguageTag;
use crate::patterns::IssueCategory;

/// Built-in exclusion rules, always active.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "*.min.js",
    "node_modules/",
    "vendor/",
    "__pycache__/",
    ".git/",
];

/// Config file names probed in the working directory, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["codesweep.yaml", ".codesweep.yaml"];

/// An extra pattern registered from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomPattern {
    pub category: IssueCategory,
    #[serde(default)]
    pub language: Option<LanguageTag>,
    pub pattern: String,
}

/// On-disk config shape.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(default)]
    exclude: Vec<String>,
    #[serde(default)]
    custom_patterns: Vec<CustomPattern>,
}

fn default_enabled() -> bool {
    true
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub enabled: bool,
    exclude: Vec<String>,
    pub custom_patterns: Vec<CustomPattern>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            enabled: true,
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            custom_patterns: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// Load a YAML config file. File-supplied `exclude` entries are
    /// appended to the built-in defaults, which stay active.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<ScanConfig> {
        let content = fs::read_to_string(path.as_ref())?;
        let file: ConfigFile = serde_yaml::from_str(&content)?;

        let mut config = ScanConfig::default();
        config.enabled = file.enabled;
        config.exclude.extend(file.exclude);
        config.custom_patterns = file.custom_patterns;
        Ok(config)
    }

    /// Look for a config file in the working directory.
    pub fn discover() -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }

    pub fn add_exclusion<S: Into<String>>(&mut self, rule: S) {
        self.exclude.push(rule.into());
    }

    pub fn exclusions(&self) -> &[String] {
        &self.exclude
    }

    /// Whether a path is excluded from all analysis.
    ///
    /// Rules are literal substrings of the path's string form, not globs:
    /// `vendor/` also matches `my-vendor/x.py`, and `*.min.js` only
    /// matches a path containing that literal text. Checked before any
    /// file I/O happens.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude.iter().any(|rule| path.contains(rule.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_rules() {
        let config = ScanConfig::default();
        assert!(config.is_excluded("node_modules/react/index.js"));
        assert!(config.is_excluded("app/__pycache__/mod.cpython-311.pyc"));
        assert!(config.is_excluded(".git/hooks/pre-commit"));
        assert!(!config.is_excluded("src/main.py"));
    }

    #[test]
    fn test_substring_semantics_over_match() {
        // Deliberate simplification: substring, not glob.
        let config = ScanConfig::default();
        assert!(config.is_excluded("my-vendor/lib.py"));
        // The literal `*.min.js` rule never matches a real minified path.
        assert!(!config.is_excluded("dist/app.min.js"));
    }

    #[test]
    fn test_user_rules_are_additive() {
        let mut config = ScanConfig::default();
        config.add_exclusion("generated/");
        assert!(config.is_excluded("src/generated/schema.py"));
        assert!(config.is_excluded("node_modules/x.js"));
    }

    #[test]
    fn test_parse_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("codesweep.yaml");
        std::fs::write(
            &path,
            "\
enabled: true
exclude:
  - dist/
custom_patterns:
  - category: debug
    language: ruby
    pattern: 'puts\\s'
  - category: banner
    pattern: 'DO NOT SHIP'
",
        )
        .unwrap();

        let config = ScanConfig::parse_file(&path).unwrap();
        assert!(config.enabled);
        assert!(config.is_excluded("dist/bundle.js"));
        assert!(config.is_excluded("node_modules/x.js"));
        assert_eq!(config.custom_patterns.len(), 2);
        assert_eq!(config.custom_patterns[0].category, IssueCategory::Debug);
        assert_eq!(
            config.custom_patterns[0].language,
            Some(LanguageTag::Ruby)
        );
        assert_eq!(
            config.custom_patterns[1].category,
            IssueCategory::Custom("banner".to_string())
        );
        assert_eq!(config.custom_patterns[1].language, None);
    }

    #[test]
    fn test_parse_file_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("codesweep.yaml");
        std::fs::write(&path, "{}\n").unwrap();

        let config = ScanConfig::parse_file(&path).unwrap();
        assert!(config.enabled);
        assert!(config.custom_patterns.is_empty());
        assert_eq!(config.exclusions().len(), DEFAULT_EXCLUDES.len());
    }
}
