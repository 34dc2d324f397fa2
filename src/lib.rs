//! # grover
//!
//! Fuzzy file finder: crawl a directory tree once, remember every file in
//! it, and rank file names against a short query.
//!
//! grover has two halves. The matcher ([`fuzzy_score`]) is a pure function
//! that rewards in-order, consecutive, word-initial and exact-case character
//! matches. The [`Crawler`] walks a tree depth-first with an explicit stack,
//! skips what the `.groverignore` rules exclude, caches the file list under
//! `~/.cache/grover/`, and answers [`find`](Crawler::find) queries from
//! memory.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! let mut crawler = grover::crawler().verbose(true).build();
//! crawler.load_ignore_rules();
//!
//! let report = crawler.crawl(".");
//! println!("File count: {}", report.stats.files);
//!
//! for m in crawler.find(None, "readme", 0.6) {
//!     println!("{}", m.record.full_path());
//! }
//! ```
//!
//! # Custom Matchers
//!
//! Implement [`Matcher`] to rank with something other than the built-in
//! fuzzy score:
//!
//! ```rust
//! use grover::Matcher;
//!
//! struct ExactMatcher;
//!
//! impl Matcher for ExactMatcher {
//!     fn score(&self, query: &str, candidate: &str) -> f64 {
//!         if query.eq_ignore_ascii_case(candidate) { 1.0 } else { 0.0 }
//!     }
//! }
//!
//! let crawler = grover::crawler().with_matcher(ExactMatcher).no_cache().build();
//! assert!(crawler.find(None, "anything", 0.5).is_empty());
//! ```

#![forbid(unsafe_code)]

pub mod cache;

mod builder;
mod engine;
mod entry;
mod error;
mod ignore_rules;
mod matcher;
mod results;
mod traits;

// ── Public re-exports ─────────────────────────────────────────────────────────

pub use builder::CrawlerBuilder;
pub use cache::sanitize_path;
pub use engine::Crawler;
pub use entry::FileRecord;
pub use error::GroverError;
pub use ignore_rules::{IgnoreRules, IGNORE_FILE_NAME};
pub use matcher::{fuzzy_score, FuzzyMatcher, DEFAULT_FUZZ};
pub use results::{CrawlReport, Match, MatchScope, ScanStats, SortOrder};
pub use traits::Matcher;

// ── Entry point ───────────────────────────────────────────────────────────────

/// Create a new [`CrawlerBuilder`] to configure a [`Crawler`].
///
/// # Example
///
/// ```rust
/// let crawler = grover::crawler().fuzz(0.25).no_cache().build();
/// assert!(crawler.files().is_empty());
/// ```
pub fn crawler() -> CrawlerBuilder {
    CrawlerBuilder::default()
}
