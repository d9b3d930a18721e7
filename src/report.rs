//! Output formatting for scan results.
//!
//! Two formats: a colored human-readable report for terminals, and JSON
//! for programmatic consumption (pre-commit hooks, CI annotations).

use colored::*;

use crate::patterns::IssueCategory;
use crate::scan::{FileAnalysisResult, RunSummary};

/// Write the run summary as pretty terminal output.
pub fn write_pretty(summary: &RunSummary) {
    println!();
    print!("  ");
    print!("{}", "codesweep".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Files analyzed: ".dimmed());
    println!("{}", summary.files_analyzed);
    print!("  {}", "Issues found:   ".dimmed());
    println!("{}", summary.issues_found);
    println!();

    for detail in &summary.details {
        write_file_detail(detail);
    }

    if let Some(duplicates) = &summary.duplicates {
        if !duplicates.is_empty() {
            println!("  {} ({}):", "Duplicate files".bold(), duplicates.len());
            for pair in duplicates {
                println!(
                    "    {} {} {}",
                    pair.duplicate.blue(),
                    "duplicates".dimmed(),
                    pair.original.blue()
                );
            }
            println!();
        }
    }

    let stats = &summary.summary;
    println!("  {}", "Totals:".bold());
    println!("    Debug statements: {}", stats.debug_statements);
    println!("    TODOs/FIXMEs:     {}", stats.todos);
    println!("    Duplicates:       {}", stats.duplicates);
    println!("    Files processed:  {}", stats.files_processed);
    println!();

    if summary.issues_found == 0 {
        println!("  {}", "clean".green());
    } else {
        println!(
            "  {}",
            format!("{} issue(s) need attention", summary.issues_found).yellow()
        );
    }
    println!();
}

fn write_file_detail(detail: &FileAnalysisResult) {
    if detail.issues.is_empty() && detail.error.is_none() {
        return;
    }

    print!("  {}", detail.path.blue());
    println!("  {}", format!("({})", detail.language).dimmed());

    if let Some(err) = &detail.error {
        println!("    {} {}", "ERROR".red(), err);
    }

    for issue in &detail.issues {
        print!("    {}", category_tag(&issue.category));
        if issue.line > 0 {
            print!("  {}", format!("line {}", issue.line).dimmed());
        }
        println!("  {}", issue.content);
    }
    println!();
}

fn category_tag(category: &IssueCategory) -> ColoredString {
    let tag = format!("{:<13}", category.as_str());
    match category {
        IssueCategory::Debug => tag.yellow(),
        IssueCategory::Todo => tag.cyan(),
        IssueCategory::UnusedImport => tag.magenta(),
        IssueCategory::ExactDuplicate => tag.red(),
        IssueCategory::Custom(_) => tag.normal(),
    }
}

/// Write the run summary as pretty-printed JSON on stdout.
pub fn write_json(summary: &RunSummary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("{}", json);
    Ok(())
}
