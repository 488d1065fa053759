//! spring-props CLI - check and format Spring Boot configuration files

mod json;

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use spring_props_core::{
    check_files, collect_files, config::CONFIG_FILE_NAME, detect_dialect,
    diagnostics::DiagnosticLevel, format_file, write_file, Dialect, Settings,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spring-props")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Check and format Spring Boot configuration files",
    long_about = "Check and format Spring Boot configuration files.\n\nHandles application.properties and application.yml / .yaml"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Report YAML syntax errors
    Check {
        /// Files or directories to check
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Format configuration files in place
    Fmt {
        /// Files or directories to format
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// List files that would change and exit non-zero instead of writing
        #[arg(long)]
        check: bool,

        /// Print a unified diff instead of writing
        #[arg(long, conflicts_with = "check")]
        diff: bool,
    },

    /// Initialize settings file
    Init {
        /// Output path for settings
        #[arg(default_value = CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    spring_props_core::locale::init_from_env();

    let result = match &cli.command {
        Commands::Check { paths, format } => check_command(paths, *format, cli.verbose),
        Commands::Fmt { paths, check, diff } => fmt_command(paths, *check, *diff),
        Commands::Init { output } => init_command(output),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Every configuration file under the given paths, without duplicates.
fn gather(paths: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.exists() {
            anyhow::bail!("path does not exist: {}", path.display());
        }
        files.extend(collect_files(path));
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Returns `Ok(false)` when errors were found.
fn check_command(paths: &[PathBuf], format: OutputFormat, verbose: bool) -> anyhow::Result<bool> {
    let files: Vec<PathBuf> = gather(paths)?
        .into_iter()
        .filter(|f| detect_dialect(f) == Dialect::Yaml)
        .collect();
    let diagnostics = check_files(&files);
    let errors = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .count();

    if format == OutputFormat::Json {
        let base = match paths {
            [single] if single.is_dir() => single.as_path(),
            _ => Path::new(""),
        };
        let output = json::CheckReport::build(&diagnostics, base, files.len());
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(errors == 0);
    }

    if diagnostics.is_empty() {
        println!(
            "{} {} checked, no issues found",
            "✓".green().bold(),
            plural(files.len(), "file", "files")
        );
        return Ok(true);
    }

    for diag in &diagnostics {
        let level_str = match diag.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };

        println!(
            "{}:{}:{} {}: {}",
            diag.file.display().to_string().dimmed(),
            diag.line,
            diag.column,
            level_str,
            diag.message
        );

        if verbose {
            println!("  {} {}", "rule:".dimmed(), diag.rule.dimmed());
        }
    }

    println!("{}", "─".repeat(60).dimmed());
    println!(
        "Found {} in {}",
        plural(errors, "error", "errors"),
        plural(files.len(), "file", "files")
    );

    Ok(errors == 0)
}

/// Returns `Ok(false)` in `--check` mode when some file is not formatted.
fn fmt_command(paths: &[PathBuf], check: bool, diff: bool) -> anyhow::Result<bool> {
    let files = gather(paths)?;
    let mut changed = 0usize;

    for file in &files {
        let Some(reformatted) = format_file(file)? else {
            tracing::debug!(file = %file.display(), "already formatted or not formattable");
            continue;
        };
        changed += 1;

        if check {
            println!("{} {}", "would reformat:".yellow().bold(), file.display());
        } else if diff {
            let name = file.display().to_string();
            let text_diff =
                similar::TextDiff::from_lines(&reformatted.original, &reformatted.formatted);
            print!(
                "{}",
                text_diff
                    .unified_diff()
                    .header(&format!("a/{}", name), &format!("b/{}", name))
            );
        } else {
            write_file(file, &reformatted.formatted)?;
            println!("{} {}", "formatted:".green().bold(), file.display());
        }
    }

    if changed == 0 {
        println!(
            "{} {} already formatted",
            "✓".green().bold(),
            plural(files.len(), "file", "files")
        );
    }

    Ok(!(check && changed > 0))
}

fn init_command(output: &PathBuf) -> anyhow::Result<bool> {
    let toml_content = toml::to_string_pretty(&Settings::default())?;

    write_file(output, &toml_content)?;

    println!(
        "{} Created settings file: {}",
        "✓".green().bold(),
        output.display()
    );

    Ok(true)
}

fn plural(count: usize, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}
