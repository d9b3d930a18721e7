//! Syntax-tree analysis for the reference language (Python).
//!
//! Two operations are offered, both best-effort: unused-import detection
//! and secondary structure counts (classes, functions, imports). When the
//! `tree-sitter` feature is disabled, or a file fails to parse, callers
//! get an empty result instead of an error — structural findings degrade,
//! they never abort a run.
//!
//! The usage model is purely lexical: any occurrence of an identifier
//! counts as a use, including as the owner of an attribute access or
//! inside a scope that shadows the import. This over-approximates usage
//! and is a known, accepted imprecision of the detector.

use std::path::Path;

use crate::language::{classify, LanguageTag};
use crate::scan::{AnalysisError, StructureMetrics};

/// Unused imports of a file on disk.
///
/// Returns an empty list for non-Python files, unreadable files, and
/// files that fail to parse. Names are sorted.
pub fn find_unused_imports<P: AsRef<Path>>(path: P) -> Vec<String> {
    if classify(&path) != LanguageTag::Python {
        return Vec::new();
    }
    match std::fs::read_to_string(path.as_ref()) {
        Ok(content) => unused_imports(&content).unwrap_or_default(),
        Err(_) => Vec::new(),
    }
}

#[cfg(feature = "tree-sitter")]
pub use imp::{file_structure, unused_imports};

#[cfg(feature = "tree-sitter")]
mod imp {
    use std::collections::{BTreeSet, HashSet};

    use streaming_iterator::StreamingIterator;
    use tree_sitter::{Node, Parser, Query, QueryCursor};

    use super::{AnalysisError, StructureMetrics};

    /// Counts one capture per class definition, function definition, and
    /// import statement (plain or `from` form).
    const STRUCTURE_QUERY: &str = r#"
(class_definition) @class
(function_definition) @function
(import_statement) @import
(import_from_statement) @import
"#;

    fn python_language() -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn parse_tree(source: &str) -> Result<tree_sitter::Tree, AnalysisError> {
        let mut parser = Parser::new();
        parser
            .set_language(&python_language())
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| AnalysisError::Parse("parser produced no tree".to_string()))?;
        if tree.root_node().has_error() {
            return Err(AnalysisError::Parse("source contains syntax errors".to_string()));
        }
        Ok(tree)
    }

    /// Imports bound but never referenced, sorted by name.
    ///
    /// Binding rules follow the language: the alias when present,
    /// otherwise the name itself — and for dotted `import a.b.c`, the
    /// first path segment is the bound name.
    pub fn unused_imports(source: &str) -> Result<Vec<String>, AnalysisError> {
        let tree = parse_tree(source)?;
        let mut imported = BTreeSet::new();
        let mut used = HashSet::new();
        collect_names(tree.root_node(), source.as_bytes(), &mut imported, &mut used);

        Ok(imported
            .into_iter()
            .filter(|name| !used.contains(name))
            .collect())
    }

    /// Class, function, and import counts for the whole file.
    pub fn file_structure(source: &str) -> Result<StructureMetrics, AnalysisError> {
        let tree = parse_tree(source)?;
        let query = Query::new(&python_language(), STRUCTURE_QUERY)
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;

        let mut metrics = StructureMetrics::default();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

        while let Some(m) = matches.next() {
            for capture in m.captures {
                match query.capture_names()[capture.index as usize] {
                    "class" => metrics.classes += 1,
                    "function" => metrics.functions += 1,
                    "import" => metrics.imports += 1,
                    _ => {}
                }
            }
        }

        Ok(metrics)
    }

    /// Walk the tree, splitting names into import bindings and identifier
    /// references. Import statements are not descended into, so their own
    /// identifiers never count as uses.
    fn collect_names(
        node: Node,
        source: &[u8],
        imported: &mut BTreeSet<String>,
        used: &mut HashSet<String>,
    ) {
        match node.kind() {
            "import_statement" => {
                record_import_bindings(node, source, imported);
                return;
            }
            "import_from_statement" => {
                record_from_import_bindings(node, source, imported);
                return;
            }
            "identifier" => {
                used.insert(node_text(node, source));
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            collect_names(child, source, imported, used);
        }
    }

    /// `import a.b.c` binds `a`; `import x as y` binds `y`.
    fn record_import_bindings(node: Node, source: &[u8], imported: &mut BTreeSet<String>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "dotted_name" => {
                    if let Some(first) = child.named_child(0) {
                        imported.insert(node_text(first, source));
                    }
                }
                "aliased_import" => {
                    if let Some(alias) = child.child_by_field_name("alias") {
                        imported.insert(node_text(alias, source));
                    }
                }
                _ => {}
            }
        }
    }

    /// `from m import a, b as c` binds `a` and `c`; the module name is not
    /// a binding. Wildcard imports bind nothing trackable.
    fn record_from_import_bindings(node: Node, source: &[u8], imported: &mut BTreeSet<String>) {
        let mut cursor = node.walk();
        for child in node.children_by_field_name("name", &mut cursor) {
            match child.kind() {
                "dotted_name" => {
                    imported.insert(node_text(child, source));
                }
                "aliased_import" => {
                    if let Some(alias) = child.child_by_field_name("alias") {
                        imported.insert(node_text(alias, source));
                    }
                }
                _ => {}
            }
        }
    }

    fn node_text(node: Node, source: &[u8]) -> String {
        node.utf8_text(source).unwrap_or("").to_string()
    }
}

#[cfg(not(feature = "tree-sitter"))]
pub fn unused_imports(_source: &str) -> Result<Vec<String>, AnalysisError> {
    Ok(Vec::new())
}

#[cfg(not(feature = "tree-sitter"))]
pub fn file_structure(_source: &str) -> Result<StructureMetrics, AnalysisError> {
    Err(AnalysisError::Parse(
        "tree-sitter support not compiled in".to_string(),
    ))
}
