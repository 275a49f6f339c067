//! CLI argument parsing with clap

use crate::compare::Collation;
use crate::config::{Config, EntryKind, Order};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// natsort - sort names the way a person reads them
///
/// Orders directory trees and string lists in natural order: embedded
/// numbers compare by value ("img2" before "img10") and everything else
/// follows the collation of your locale.
#[derive(Parser, Debug)]
#[command(name = "natsort")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments will override config file settings.
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output order
    #[arg(short, long, value_enum, global = true)]
    pub order: Option<Order>,

    /// Locale whose collation orders text, e.g. "zh-CN" (default: system locale)
    #[arg(long, global = true, conflicts_with = "code_point")]
    pub locale: Option<String>,

    /// Order text by Unicode code point instead of locale collation
    #[arg(long, global = true)]
    pub code_point: bool,

    /// Number of threads for listing directories (0 = auto)
    #[arg(short = 't', long, global = true)]
    pub threads: Option<usize>,

    /// Print the result as a JSON array
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long, global = true)]
    pub json_log: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List a directory tree in natural order
    Dir(DirArgs),
    /// Sort strings given as arguments, or one per line on stdin
    List(ListArgs),
    /// Print a sample configuration file
    SampleConfig,
}

#[derive(Args, Debug)]
pub struct DirArgs {
    /// Directory to list
    pub path: PathBuf,

    /// Entries to print
    #[arg(short = 'k', long, value_enum)]
    pub kind: Option<EntryKind>,

    /// Levels to descend below the directory (0 = unlimited)
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Print paths relative to the listed directory
    #[arg(short, long)]
    pub relative: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Strings to sort; read from stdin when omitted
    pub items: Vec<String>,
}

impl Cli {
    fn collation(&self) -> Option<Collation> {
        if self.code_point {
            Some(Collation::CodePoint)
        } else {
            self.locale.clone().map(Collation::Locale)
        }
    }

    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(order) = self.order {
            config.order = order;
        }
        if let Some(collation) = self.collation() {
            config.collation = collation;
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
        if let Command::Dir(args) = &self.command {
            if let Some(kind) = args.kind {
                config.entry_kind = kind;
            }
            if let Some(depth) = args.depth {
                config.depth = depth;
            }
        }

        config
    }

    /// Convert CLI arguments to Config (when no config file is used)
    pub fn to_config(&self) -> Config {
        self.merge_with_config(Config::default())
    }
}
