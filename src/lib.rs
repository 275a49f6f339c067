//! natsort-tree - natural-order sorting for names and directory trees
//!
//! Orders strings and paths the way Windows Explorer does:
//! - digit runs compare by numeric value ("img2" before "img10")
//! - equal numbers put the more zero-padded run first ("00" before "0")
//! - other characters follow locale-aware collation (ICU4X)
//! - directory trees list directories before files at every level, each
//!   directory followed by its own sorted contents

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod i18n;
pub mod sort;
pub mod tree;

pub use cli::Cli;
pub use compare::{Collation, NaturalComparator, decompose};
pub use config::{Config, ConfigError, EntryKind, Order};
pub use error::{Error, Result};
pub use sort::{sort_strings, sort_strings_str};
pub use tree::{SkippedDir, SortedTree, TreeOptions, TreeSorter, TreeStats, sort_directory};
