//! natsort - natural-order sorting of directory trees and string lists
//!
//! Prints a directory tree, or a list of strings, in the order a person
//! expects: numbers by value, text by locale collation.

use anyhow::{Context, Result};
use clap::Parser;
use path_clean::PathClean;
use natsort_tree::cli::{Command, DirArgs, ListArgs};
use natsort_tree::i18n::Strings;
use natsort_tree::{Cli, Config, NaturalComparator, SortedTree, TreeSorter, sort_strings};
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

// CLI Output Module
mod cli_output {
    //! Colored summaries on stderr, keeping stdout for results.

    use crossterm::{
        ExecutableCommand,
        style::{Color, Print, Stylize, style},
    };
    use std::io::stderr;

    /// CLI theme colors
    pub struct CliTheme;

    impl CliTheme {
        pub const WARNING: Color = Color::Yellow;
        pub const HINT: Color = Color::DarkGrey;
        pub const ACCENT: Color = Color::Cyan;
    }

    /// Print a warning message
    pub fn print_warning(msg: &str) {
        let _ = stderr().execute(Print(style("⚠ ").with(CliTheme::WARNING).bold()));
        let _ = stderr().execute(Print(format!("{}\n", msg)));
    }

    /// Print a hint message
    pub fn print_hint(msg: &str) {
        let _ = stderr().execute(Print(style("→ ").with(CliTheme::HINT)));
        let _ = stderr().execute(Print(format!("{}\n", msg)));
    }

    /// Print a key-value pair
    pub fn print_key_value(key: &str, value: &str, value_color: Option<Color>) {
        let key_styled = style(key).with(CliTheme::HINT);
        let value_styled = match value_color {
            Some(color) => style(value).with(color),
            None => style(value).bold(),
        };
        let _ = stderr().execute(Print("  "));
        let _ = stderr().execute(Print(key_styled));
        let _ = stderr().execute(Print(": "));
        let _ = stderr().execute(Print(value_styled));
        let _ = stderr().execute(Print("\n"));
    }
}

fn main() {
    let cli = Cli::parse();

    let _guard = match setup_logging(&cli) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&cli) {
        error!(error = %e, "natsort failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "natsort starting");

    let config = load_config(cli)?;
    if cli.verbose {
        debug!(?config, "Configuration loaded");
    }

    match &cli.command {
        Command::Dir(args) => run_dir(cli, &config, args),
        Command::List(args) => run_list(cli, &config, args),
        Command::SampleConfig => {
            cli_output::print_hint(Strings::config_written());
            print!("{}", Config::sample_config());
            Ok(())
        }
    }
}

/// Sort a directory tree and print it
fn run_dir(cli: &Cli, config: &Config, args: &DirArgs) -> Result<()> {
    let sorter = TreeSorter::from_config(config);
    let tree = sorter.sort_directory(&args.path)?;

    let paths = if args.relative {
        let root = std::path::absolute(&args.path)?;
        tree.relative_to(&root.clean())
    } else {
        tree.paths.clone()
    };

    if cli.json {
        let rendered: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        write_json(&rendered)?;
    } else {
        write_lines(paths.iter().map(|p| p.display().to_string()))?;
    }

    report_tree(cli, sorter.comparator(), &tree);
    Ok(())
}

/// Sort strings from the arguments or stdin and print them
fn run_list(cli: &Cli, config: &Config, args: &ListArgs) -> Result<()> {
    let items = if args.items.is_empty() {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            cli_output::print_hint(Strings::reading_stdin());
        }
        stdin
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .context("Failed to read stdin")?
    } else {
        args.items.clone()
    };

    let comparator = NaturalComparator::new(config.collation.clone());
    let sorted = sort_strings(items, config.order, &comparator);
    info!(count = sorted.len(), "Strings sorted");

    if cli.json {
        write_json(&sorted)
    } else {
        write_lines(sorted)
    }
}

fn write_lines<I, S>(lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    for line in lines {
        writeln!(out, "{}", line.as_ref())?;
    }
    out.flush()?;
    Ok(())
}

fn write_json(items: &[String]) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, items)?;
    writeln!(out)?;
    Ok(())
}

/// Summarize skipped directories (always) and statistics (verbose) on stderr
fn report_tree(cli: &Cli, comparator: &NaturalComparator, tree: &SortedTree) {
    use cli_output::*;

    if !tree.skipped.is_empty() {
        print_warning(Strings::skipped_header());
        for skipped in &tree.skipped {
            print_key_value(
                &skipped.path.display().to_string(),
                &skipped.reason,
                Some(CliTheme::WARNING),
            );
        }
        print_hint(Strings::skipped_hint());
    }

    if cli.verbose {
        let collation = comparator
            .resolved_locale()
            .unwrap_or(Strings::code_point_order());
        print_key_value(Strings::collation(), collation, Some(CliTheme::ACCENT));
        print_key_value(Strings::sorted_entries(), &tree.paths.len().to_string(), None);
        print_key_value(
            Strings::directories_listed(),
            &tree.stats.directories_listed.to_string(),
            None,
        );
    }
}

/// Resolve config path - supports shorthand syntax
fn resolve_config_path(config_path: &Path) -> PathBuf {
    if config_path.exists() {
        return config_path.to_path_buf();
    }

    if config_path.extension().is_none() {
        let with_extension = config_path.with_extension("toml");
        if with_extension.exists() {
            return with_extension;
        }
    }

    config_path.to_path_buf()
}

/// Load configuration from file or CLI arguments
fn load_config(cli: &Cli) -> Result<Config> {
    let config = if let Some(ref config_path) = cli.config {
        let resolved_path = resolve_config_path(config_path);
        info!(config_file = %resolved_path.display(), "Loading configuration from file");
        let file_config = Config::load_from_file(&resolved_path)?;
        cli.merge_with_config(file_config)
    } else {
        cli.to_config()
    };

    Ok(config)
}

/// Setup logging: stderr always, plus an optional log file
fn setup_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let Some(log_path) = &cli.log_file else {
        if cli.json_log {
            subscriber
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        } else {
            subscriber
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        return Ok(None);
    };

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    if cli.json_log {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking),
            )
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(Some(guard))
}
