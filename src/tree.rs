//! Breadth-first natural-order directory listing
//!
//! Every directory is listed on its own, its children split into
//! directories and files, and each group sorted by name with the
//! [`NaturalComparator`]. Directories come before files at every level.
//! Levels are processed breadth-first; a directory's sorted children are
//! spliced in right after its own entry, so the flattened result reads
//! like a fully expanded Explorer tree:
//!
//! ```text
//! A
//! A/x.txt
//! B
//! B/x.txt
//! f1.txt
//! f2.txt
//! ```
//!
//! Sibling directories of one level are listed in parallel with Rayon.
//! Sorting and splicing happen afterwards on the calling thread, in level
//! order, so the output does not depend on scheduling.

use crate::compare::NaturalComparator;
use crate::config::{Config, EntryKind, Order};
use crate::error::{Error, Result};
use crate::sort::sort_strings;
use path_clean::PathClean;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, trace, warn};
use walkdir::WalkDir;

/// Options controlling a directory listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TreeOptions {
    /// Output order, applied to every level independently
    pub order: Order,
    /// Entry kinds kept in the output
    pub entry_kind: EntryKind,
    /// Levels to list below the root (0 = unlimited)
    pub depth: usize,
    /// Threads used for listing (0 = Rayon default)
    pub threads: usize,
}

impl From<&Config> for TreeOptions {
    fn from(config: &Config) -> Self {
        Self {
            order: config.order,
            entry_kind: config.entry_kind,
            depth: config.depth,
            threads: config.threads,
        }
    }
}

/// A subdirectory whose contents were left out because it could not be listed
#[derive(Debug, Clone, Serialize)]
pub struct SkippedDir {
    pub path: PathBuf,
    pub reason: String,
}

/// Counters collected while listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeStats {
    /// Directories whose children were read
    pub directories_listed: usize,
    /// Entries found across all listed directories
    pub entries_seen: usize,
    /// Levels processed, the root's children being level 1
    pub levels: usize,
}

/// Result of [`TreeSorter::sort_directory`]
#[derive(Debug, Clone, Default, Serialize)]
pub struct SortedTree {
    /// Normalized absolute paths in natural pre-order; never contains the root
    pub paths: Vec<PathBuf>,
    /// Subdirectories that could not be listed
    pub skipped: Vec<SkippedDir>,
    pub stats: TreeStats,
}

impl SortedTree {
    /// Paths relative to `root`, for display
    pub fn relative_to(&self, root: &Path) -> Vec<PathBuf> {
        self.paths
            .iter()
            .map(|p| p.strip_prefix(root).map(Path::to_path_buf).unwrap_or_else(|_| p.clone()))
            .collect()
    }
}

/// One directory entry, sorted by its name
#[derive(Debug)]
struct Child {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

impl AsRef<str> for Child {
    fn as_ref(&self) -> &str {
        &self.name
    }
}

/// Unsorted children of a single directory
#[derive(Debug, Default)]
struct Listing {
    dirs: Vec<Child>,
    files: Vec<Child>,
}

/// Arena node of the traversal tree
#[derive(Debug)]
struct Node {
    path: PathBuf,
    is_dir: bool,
    parent: Option<usize>,
    /// Resolved location, used to spot symlink cycles
    canonical: Option<PathBuf>,
    children: Vec<usize>,
}

/// Natural-order directory lister
pub struct TreeSorter {
    options: TreeOptions,
    comparator: NaturalComparator,
    pool: Option<rayon::ThreadPool>,
}

impl TreeSorter {
    /// Create a sorter with the given options and comparator
    pub fn new(options: TreeOptions, comparator: NaturalComparator) -> Self {
        let pool = if options.threads > 0 {
            match rayon::ThreadPoolBuilder::new()
                .num_threads(options.threads)
                .build()
            {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!(error = %e, threads = options.threads, "Failed to build thread pool, using global pool");
                    None
                }
            }
        } else {
            None
        };

        Self {
            options,
            comparator,
            pool,
        }
    }

    /// Create a sorter from a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TreeOptions::from(config),
            NaturalComparator::new(config.collation.clone()),
        )
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub fn comparator(&self) -> &NaturalComparator {
        &self.comparator
    }

    /// List `root` and its descendants in natural order
    ///
    /// Fails with [`Error::NotFound`] when `root` is missing or not a
    /// directory, and with [`Error::Access`] when `root` itself cannot be
    /// read. Subdirectories that cannot be read are recorded in
    /// [`SortedTree::skipped`] and the traversal continues.
    pub fn sort_directory(&self, root: impl AsRef<Path>) -> Result<SortedTree> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::NotFound {
                path: root.to_path_buf(),
            });
        }
        let root = std::path::absolute(root)?.clean();

        let span = span!(Level::DEBUG, "sort_directory", root = %root.display());
        let _enter = span.enter();

        let mut nodes = vec![Node {
            canonical: fs::canonicalize(&root).ok(),
            path: root.clone(),
            is_dir: true,
            parent: None,
            children: Vec::new(),
        }];
        let mut frontier = vec![0usize];
        let mut skipped = Vec::new();
        let mut stats = TreeStats::default();
        let include_files = self.options.entry_kind.includes_files();

        while !frontier.is_empty() && (self.options.depth == 0 || stats.levels < self.options.depth)
        {
            stats.levels += 1;
            debug!(level = stats.levels, directories = frontier.len(), "Listing level");

            let listings = self.list_level(&nodes, &frontier, include_files);
            let mut next_frontier = Vec::new();

            for (&index, listing) in frontier.iter().zip(listings) {
                let listing = match listing {
                    Ok(listing) => listing,
                    Err(e) if index == 0 => return Err(e),
                    Err(e) => {
                        let path = nodes[index].path.clone();
                        warn!(path = %path.display(), error = %e, "Cannot list directory, skipping its contents");
                        skipped.push(SkippedDir {
                            path,
                            reason: e.to_string(),
                        });
                        continue;
                    }
                };

                stats.directories_listed += 1;
                stats.entries_seen += listing.dirs.len() + listing.files.len();

                let dirs = sort_strings(listing.dirs, self.options.order, &self.comparator);
                let files = sort_strings(listing.files, self.options.order, &self.comparator);

                for child in dirs.into_iter().chain(files) {
                    let child_index = nodes.len();
                    if child.is_dir {
                        let canonical = fs::canonicalize(&child.path).ok();
                        if is_cycle(&nodes, index, canonical.as_deref()) {
                            debug!(path = %child.path.display(), "Directory links back to an ancestor, not descending");
                        } else {
                            next_frontier.push(child_index);
                        }
                        nodes.push(Node {
                            path: child.path,
                            is_dir: true,
                            parent: Some(index),
                            canonical,
                            children: Vec::new(),
                        });
                    } else {
                        nodes.push(Node {
                            path: child.path,
                            is_dir: false,
                            parent: Some(index),
                            canonical: None,
                            children: Vec::new(),
                        });
                    }
                    nodes[index].children.push(child_index);
                }
            }

            frontier = next_frontier;
        }

        let paths = flatten(nodes, self.options.entry_kind);

        info!(
            root = %root.display(),
            paths = paths.len(),
            skipped = skipped.len(),
            directories = stats.directories_listed,
            "Directory sorted"
        );

        Ok(SortedTree {
            paths,
            skipped,
            stats,
        })
    }

    /// Read every directory of one level, in parallel, keeping frontier order
    fn list_level(&self, nodes: &[Node], frontier: &[usize], include_files: bool) -> Vec<Result<Listing>> {
        let work = || {
            frontier
                .par_iter()
                .map(|&index| list_children(&nodes[index].path, include_files))
                .collect::<Vec<_>>()
        };

        match &self.pool {
            Some(pool) => pool.install(work),
            None => work(),
        }
    }
}

/// Sort `root` with the system collation
pub fn sort_directory(
    root: impl AsRef<Path>,
    order: Order,
    entry_kind: EntryKind,
    depth: usize,
) -> Result<SortedTree> {
    let options = TreeOptions {
        order,
        entry_kind,
        depth,
        threads: 0,
    };
    TreeSorter::new(options, NaturalComparator::default()).sort_directory(root)
}

/// Read the immediate children of `dir`, split into directories and files
///
/// Symlinks are resolved, so a link to a directory counts as a directory.
/// Entries that are neither (broken links, sockets, devices) are dropped.
fn list_children(dir: &Path, include_files: bool) -> Result<Listing> {
    let mut listing = Listing::default();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory cannot be read"));
                return Err(Error::access(dir, source));
            }
            Err(e) => {
                trace!(error = %e, "Dropping unreadable entry");
                continue;
            }
        };

        let name = entry.file_name().to_string_lossy().into_owned();
        let (is_dir, is_file) = if entry.path_is_symlink() {
            match fs::metadata(entry.path()) {
                Ok(target) => (target.is_dir(), target.is_file()),
                Err(_) => (false, false),
            }
        } else {
            (entry.file_type().is_dir(), entry.file_type().is_file())
        };

        if is_dir {
            listing.dirs.push(Child {
                name,
                path: entry.into_path(),
                is_dir: true,
            });
        } else if is_file {
            if include_files {
                listing.files.push(Child {
                    name,
                    path: entry.into_path(),
                    is_dir: false,
                });
            }
        } else {
            trace!(path = %entry.path().display(), "Dropping entry that is neither file nor directory");
        }
    }

    Ok(listing)
}

/// Whether `canonical` is `parent` or one of its ancestors
fn is_cycle(nodes: &[Node], parent: usize, canonical: Option<&Path>) -> bool {
    let Some(canonical) = canonical else {
        return false;
    };

    let mut current = Some(parent);
    while let Some(index) = current {
        if nodes[index].canonical.as_deref() == Some(canonical) {
            return true;
        }
        current = nodes[index].parent;
    }
    false
}

/// Pre-order walk of the arena below the root
fn flatten(mut nodes: Vec<Node>, entry_kind: EntryKind) -> Vec<PathBuf> {
    let keep_dirs = entry_kind.includes_directories();
    let mut paths = Vec::with_capacity(nodes.len().saturating_sub(1));
    let mut stack: Vec<usize> = nodes[0].children.iter().rev().copied().collect();

    while let Some(index) = stack.pop() {
        let node = &mut nodes[index];
        stack.extend(node.children.iter().rev());
        if !node.is_dir || keep_dirs {
            paths.push(std::mem::take(&mut node.path));
        }
    }

    paths
}
