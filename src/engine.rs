use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use std::time::Instant;

use crate::cache;
use crate::entry::FileRecord;
use crate::error::GroverError;
use crate::ignore_rules::{IgnoreRules, IGNORE_FILE_NAME};
use crate::results::{CrawlReport, Match, MatchScope, ScanStats, SortOrder};
use crate::traits::Matcher;

/// Side-channel reporting. Emits nothing unless the crawler is verbose.
macro_rules! report {
    ($crawler:expr, $level:ident, $($arg:tt)+) => {
        if $crawler.options.verbose {
            tracing::$level!($($arg)+);
        }
    };
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Where [`Crawler::cache_results`] writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum CacheLocation {
    /// `<home>/.cache/grover`.
    #[default]
    Home,
    Dir(PathBuf),
    Disabled,
}

/// Settings fixed at build time by the builder.
pub(crate) struct CrawlOptions {
    pub verbose:      bool,
    pub follow_links: bool,
    pub scope:        MatchScope,
    pub order:        SortOrder,
    pub cache:        CacheLocation,
}

// ---------------------------------------------------------------------------
// Crawler
// ---------------------------------------------------------------------------

/// Depth-first directory crawler with fuzzy lookup over what it found.
///
/// Build one with [`crawler()`](crate::crawler), [`crawl`](Self::crawl) one
/// or more roots, then [`find`](Self::find) as often as needed. Everything
/// runs synchronously on the calling thread.
pub struct Crawler {
    files:    Vec<FileRecord>,
    frontier: Vec<PathBuf>,
    visited:  HashSet<PathBuf>,
    rules:    IgnoreRules,
    matcher:  Box<dyn Matcher>,
    options:  CrawlOptions,
}

/// One directory entry, classified.
struct Listed {
    name:   String,
    path:   PathBuf,
    is_dir: bool,
}

impl Crawler {
    pub(crate) fn new(rules: IgnoreRules, matcher: Box<dyn Matcher>, options: CrawlOptions) -> Self {
        Self {
            files: Vec::new(),
            frontier: Vec::new(),
            visited: HashSet::new(),
            rules,
            matcher,
            options,
        }
    }

    // ── Ignore rules ──────────────────────────────────────────────────────

    /// Replace the rule set with the contents of `./.groverignore`.
    ///
    /// A missing or unreadable file leaves the crawler with no rules and
    /// is only reported.
    pub fn load_ignore_rules(&mut self) {
        self.load_ignore_rules_from(IGNORE_FILE_NAME);
    }

    /// Like [`load_ignore_rules`](Self::load_ignore_rules), from an explicit path.
    pub fn load_ignore_rules_from(&mut self, path: impl AsRef<Path>) {
        self.rules = match IgnoreRules::load(path) {
            Ok(rules) => rules,
            Err(e) => {
                report!(self, warn, error = %e, "no ignore rules loaded");
                IgnoreRules::new()
            }
        };
    }

    pub fn ignore_rules(&self) -> &IgnoreRules {
        &self.rules
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Walk everything under `root`, then cache the collected files.
    ///
    /// The frontier is a stack: the most recently discovered directory is
    /// listed next. Directories matching a directory rule are not entered.
    /// Each canonical directory is listed at most once per crawl, so symlink
    /// cycles terminate. Unlistable directories and cache failures are
    /// reported and collected into the returned [`CrawlReport`]; they never
    /// stop the crawl.
    ///
    /// Files found are appended to the collection, so crawling a second root
    /// extends the results of the first.
    pub fn crawl(&mut self, root: impl AsRef<Path>) -> CrawlReport {
        let root = root.as_ref();
        let start = Instant::now();
        let mut stats = ScanStats::default();
        let mut errors = Vec::new();

        self.visited.clear();
        self.frontier.push(root.to_path_buf());

        while let Some(dir) = self.frontier.pop() {
            let dir: PathBuf = dir.components().collect();
            let directory = normalize_directory(&dir);

            if self.is_ignored_directory(&dir) {
                report!(self, debug, directory = %directory, "ignoring");
                stats.ignored_dirs += 1;
                continue;
            }

            let key = fs::canonicalize(&dir).unwrap_or_else(|_| dir.clone());
            if !self.visited.insert(key) {
                report!(self, debug, directory = %directory, "already visited");
                continue;
            }

            report!(self, debug, directory = %directory, "crawling");
            match self.list(&dir, &mut errors) {
                Ok(entries) => {
                    stats.dirs += 1;
                    self.visit(&directory, entries, &mut stats);
                }
                Err(source) => {
                    let err = GroverError::ListDirectory { path: dir, source };
                    report!(self, warn, error = %err, "skipping directory");
                    errors.push(err);
                }
            }
        }

        stats.finish(start.elapsed());

        let cache_file = match self.cache_results(root) {
            Ok(path) => path,
            Err(e) => {
                report!(self, warn, error = %e, "results not cached");
                errors.push(e);
                None
            }
        };

        CrawlReport {
            stats,
            cache_file,
            errors,
        }
    }

    fn is_ignored_directory(&self, dir: &Path) -> bool {
        dir.file_name()
            .is_some_and(|name| self.rules.ignores_directory(&name.to_string_lossy()))
    }

    /// Immediate entries of `dir`, sorted by name.
    ///
    /// Only failing to open `dir` fails the listing. An entry that cannot be
    /// read or typed is reported, pushed onto `errors` and left out, and the
    /// rest of the directory is still returned.
    fn list(&self, dir: &Path, errors: &mut Vec<GroverError>) -> std::io::Result<Vec<Listed>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    self.skip_entry(GroverError::ReadEntry { path: dir.to_path_buf(), source }, errors);
                    continue;
                }
            };
            let path = entry.path();
            let ft = match entry.file_type() {
                Ok(ft) => ft,
                Err(source) => {
                    self.skip_entry(GroverError::ReadEntry { path, source }, errors);
                    continue;
                }
            };

            let is_dir = if ft.is_symlink() && self.options.follow_links {
                fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false)
            } else {
                ft.is_dir()
            };

            entries.push(Listed {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                is_dir,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn skip_entry(&self, err: GroverError, errors: &mut Vec<GroverError>) {
        report!(self, warn, error = %err, "skipping entry");
        errors.push(err);
    }

    /// Push subdirectories onto the frontier and record unignored files.
    fn visit(&mut self, directory: &str, entries: Vec<Listed>, stats: &mut ScanStats) {
        for entry in entries {
            if entry.is_dir {
                self.frontier.push(entry.path);
            } else if self.rules.ignores_file(&entry.name) {
                report!(self, debug, file = %format!("{directory}{}", entry.name), "ignoring");
                stats.ignored_files += 1;
            } else {
                self.files.push(FileRecord::new(entry.name, directory));
                stats.files += 1;
            }
        }
    }

    // ── Cache ─────────────────────────────────────────────────────────────

    fn cache_dir(&self) -> Result<Option<PathBuf>, GroverError> {
        match &self.options.cache {
            CacheLocation::Home => cache::default_cache_dir().map(Some),
            CacheLocation::Dir(dir) => Ok(Some(dir.clone())),
            CacheLocation::Disabled => Ok(None),
        }
    }

    /// Write every collected file to the cache file for `root`.
    ///
    /// Returns the file written, or `None` when caching is disabled.
    ///
    /// # Errors
    ///
    /// Any [`GroverError`] from locating the home directory or writing the
    /// file. [`crawl`](Self::crawl) reports these instead of returning them.
    pub fn cache_results(&self, root: impl AsRef<Path>) -> Result<Option<PathBuf>, GroverError> {
        let Some(dir) = self.cache_dir()? else {
            return Ok(None);
        };
        let path = cache::write_cache(&dir, root.as_ref(), &self.files)?;
        report!(self, debug, cache = %path.display(), files = self.files.len(), "cached results");
        Ok(Some(path))
    }

    /// Append the files cached by an earlier crawl of `root` to the
    /// collection, without touching the filesystem tree. Returns the number
    /// of records loaded; always `0` when caching is disabled.
    ///
    /// # Errors
    ///
    /// [`GroverError::NoHomeDirectory`] or [`GroverError::CacheFile`]; use
    /// [`GroverError::is_not_found`] to detect a root that was never cached.
    pub fn restore(&mut self, root: impl AsRef<Path>) -> Result<usize, GroverError> {
        let Some(dir) = self.cache_dir()? else {
            return Ok(0);
        };
        let records = cache::read_cache(&dir, root.as_ref())?;
        let count = records.len();
        self.files.extend(records);
        report!(self, debug, root = %root.as_ref().display(), files = count, "restored from cache");
        Ok(count)
    }

    /// Delete the cache file for `root`. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Same as [`restore`](Self::restore), except that a missing file is not
    /// an error.
    pub fn clear_cache(&self, root: impl AsRef<Path>) -> Result<bool, GroverError> {
        match self.cache_dir()? {
            Some(dir) => cache::clear_cache(&dir, root.as_ref()),
            None => Ok(false),
        }
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Every file collected so far, in discovery order.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Score every collected file against `query` and keep those scoring
    /// strictly above `threshold`.
    ///
    /// Files are visited in discovery order and collection stops as soon as
    /// `limit` matches are held (`None` means no limit). The kept matches are
    /// then sorted by confidence in the configured [`SortOrder`], which is
    /// ascending unless the builder said otherwise.
    pub fn find(&self, limit: Option<usize>, query: &str, threshold: f64) -> Vec<Match<'_>> {
        let mut matches = Vec::new();
        if limit == Some(0) {
            return matches;
        }

        for record in &self.files {
            let confidence = self.score(query, record);
            if confidence > threshold {
                matches.push(Match { record, confidence });
                if limit.is_some_and(|lim| matches.len() >= lim) {
                    break;
                }
            }
        }

        self.options.order.sort(&mut matches);
        matches
    }

    fn score(&self, query: &str, record: &FileRecord) -> f64 {
        match self.options.scope {
            MatchScope::Name => self.matcher.score(query, &record.name),
            MatchScope::Path => self.matcher.score(query, &record.directory),
            MatchScope::Both => self
                .matcher
                .score(query, &record.name)
                .max(self.matcher.score(query, &record.directory)),
        }
    }
}

/// `dir` as a string ending in exactly one separator.
fn normalize_directory(dir: &Path) -> String {
    let raw = dir.to_string_lossy();
    let trimmed = raw.trim_end_matches(std::path::is_separator);
    format!("{trimmed}{MAIN_SEPARATOR}")
}
