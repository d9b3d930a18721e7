//! Command-line interface for codesweep.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::language::LanguageTag;
use crate::patterns::PatternRegistry;
use crate::report;
use crate::scan::{RunOptions, Runner};

/// Exit codes.
pub const EXIT_CLEAN: i32 = 0;
pub const EXIT_ISSUES: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Pre-commit source scanner.
///
/// Codesweep scans staged or listed files for debug statements, stale
/// TODO/FIXME markers, unused Python imports, and exact-duplicate files,
/// and exits non-zero when anything needs attention.
#[derive(Parser)]
#[command(name = "codesweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan files for cleanup issues
    #[command(visible_alias = "check")]
    Scan(ScanArgs),
    /// Create a starter configuration file
    Init(InitArgs),
}

/// Arguments for the scan command.
#[derive(Parser)]
pub struct ScanArgs {
    /// Files to scan (pass explicit paths, or use --all)
    pub files: Vec<PathBuf>,

    /// Scan every non-excluded file under the working directory
    #[arg(long)]
    pub all: bool,

    /// Report debug statements only
    #[arg(long)]
    pub debug: bool,

    /// Report TODO/FIXME markers only
    #[arg(long)]
    pub todos: bool,

    /// Also scan the working directory for exact-duplicate files
    #[arg(long)]
    pub duplicates: bool,

    /// Also report unused Python imports
    #[arg(long)]
    pub unused: bool,

    /// Only scan files of this language (python, javascript, go, ...)
    #[arg(short, long)]
    pub language: Option<LanguageTag>,

    /// Path to a config file (default: auto-discover codesweep.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "codesweep.yaml")]
    pub output: PathBuf,
}

/// Starter configuration written by `codesweep init`.
const DEFAULT_CONFIG_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Collect every file under `root` that survives the exclusion filter.
fn collect_files(root: &Path, config: &ScanConfig) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if config.is_excluded(&path.to_string_lossy()) {
            continue;
        }
        files.push(path.to_path_buf());
    }
    Ok(files)
}

/// Run the scan command.
pub fn run_scan(args: &ScanArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    // Explicit config path, else auto-discovered, else defaults.
    let config = match &args.config {
        Some(path) => match ScanConfig::parse_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error reading config {:?}: {}", path, e);
                return Ok(EXIT_ERROR);
            }
        },
        None => match ScanConfig::discover() {
            Some(path) => match ScanConfig::parse_file(&path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error reading config {:?}: {}", path, e);
                    return Ok(EXIT_ERROR);
                }
            },
            None => ScanConfig::default(),
        },
    };

    if !config.enabled {
        println!("codesweep is disabled by configuration");
        return Ok(EXIT_CLEAN);
    }

    // Custom patterns register during this single-threaded setup phase,
    // before any scanning starts.
    let mut registry = PatternRegistry::new();
    for custom in &config.custom_patterns {
        if let Err(e) = registry.register(custom.category.clone(), &custom.pattern, custom.language)
        {
            eprintln!("Error: invalid custom pattern {:?}: {}", custom.pattern, e);
            return Ok(EXIT_ERROR);
        }
    }

    let files = if !args.files.is_empty() {
        args.files.clone()
    } else if args.all {
        collect_files(Path::new("."), &config)?
    } else {
        eprintln!("Error: no files to process (pass paths or --all)");
        return Ok(EXIT_ERROR);
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_CLEAN);
    }

    let options = RunOptions {
        include_debug: args.debug,
        include_todos: args.todos,
        include_duplicates: args.duplicates,
        include_unused_imports: args.unused,
        language_filter: args.language,
    };

    let mut runner = Runner::new(config, registry);
    let summary = runner.run(&files, &options);

    match args.format.as_str() {
        "json" => report::write_json(&summary)?,
        _ => report::write_pretty(&summary),
    }

    let duplicate_count = summary.duplicates.as_ref().map_or(0, Vec::len);
    if summary.issues_found > 0 || duplicate_count > 0 {
        Ok(EXIT_ISSUES)
    } else {
        Ok(EXIT_CLEAN)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        return Ok(EXIT_ERROR);
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize exclusions", args.output.display());
    println!("  2. Run: codesweep scan --all");

    Ok(EXIT_CLEAN)
}
