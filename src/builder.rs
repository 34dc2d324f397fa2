use std::path::PathBuf;

use crate::engine::{CacheLocation, CrawlOptions, Crawler};
use crate::ignore_rules::IgnoreRules;
use crate::matcher::{FuzzyMatcher, DEFAULT_FUZZ};
use crate::results::{MatchScope, SortOrder};
use crate::traits::Matcher;

// ---------------------------------------------------------------------------
// CrawlerBuilder
// ---------------------------------------------------------------------------

/// Entry point for configuring a [`Crawler`].
///
/// Created via [`grover::crawler()`](crate::crawler). Configure with chained
/// builder methods, then call [`build()`](CrawlerBuilder::build).
///
/// # Example
///
/// ```rust,no_run
/// use grover::{MatchScope, SortOrder};
///
/// let mut crawler = grover::crawler()
///     .fuzz(0.3)
///     .scope(MatchScope::Both)
///     .order(SortOrder::Descending)
///     .verbose(true)
///     .build();
///
/// crawler.load_ignore_rules();
/// crawler.crawl("/home/me/projects");
/// for m in crawler.find(Some(10), "readme", 0.6) {
///     println!("{:.3} {}", m.confidence, m.record.full_path());
/// }
/// ```
pub struct CrawlerBuilder {
    matcher:      Option<Box<dyn Matcher>>,
    fuzz:         f64,
    rules:        IgnoreRules,
    verbose:      bool,
    follow_links: bool,
    scope:        MatchScope,
    order:        SortOrder,
    cache:        CacheLocation,
}

impl Default for CrawlerBuilder {
    fn default() -> Self {
        Self {
            matcher:      None,
            fuzz:         DEFAULT_FUZZ,
            rules:        IgnoreRules::new(),
            verbose:      false,
            follow_links: false,
            scope:        MatchScope::default(),
            order:        SortOrder::default(),
            cache:        CacheLocation::default(),
        }
    }
}

impl CrawlerBuilder {
    // ── Matcher ───────────────────────────────────────────────────────────

    /// Penalty for each query character missing from a candidate.
    ///
    /// Configures the built-in [`FuzzyMatcher`]. Ignored when a custom
    /// matcher is set with [`with_matcher()`](Self::with_matcher).
    pub fn fuzz(mut self, fuzz: f64) -> Self {
        self.fuzz = fuzz;
        self
    }

    /// Replace the fuzzy scorer with any [`Matcher`].
    pub fn with_matcher(mut self, m: impl Matcher + 'static) -> Self {
        self.matcher = Some(Box::new(m));
        self
    }

    /// Score against the file name, the directory, or both. Defaults to
    /// [`MatchScope::Name`].
    pub fn scope(mut self, scope: MatchScope) -> Self {
        self.scope = scope;
        self
    }

    /// Sort direction of [`Crawler::find`]. Defaults to
    /// [`SortOrder::Ascending`].
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Start with these rules instead of an empty set.
    ///
    /// [`Crawler::load_ignore_rules`] replaces them.
    pub fn ignore_rules(mut self, rules: IgnoreRules) -> Self {
        self.rules = rules;
        self
    }

    /// Enter symlinked directories. Off by default, in which case symlinks
    /// are recorded as plain files.
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.follow_links = yes;
        self
    }

    /// Report progress and non-fatal errors through `tracing`.
    ///
    /// Disabled by default, in which case the crawler emits nothing.
    pub fn verbose(mut self, yes: bool) -> Self {
        self.verbose = yes;
        self
    }

    // ── Cache ─────────────────────────────────────────────────────────────

    /// Cache into `dir` instead of `<home>/.cache/grover`.
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache = CacheLocation::Dir(dir.into());
        self
    }

    /// Never read or write the on-disk cache.
    pub fn no_cache(mut self) -> Self {
        self.cache = CacheLocation::Disabled;
        self
    }

    // ── Build ─────────────────────────────────────────────────────────────

    pub fn build(self) -> Crawler {
        let matcher: Box<dyn Matcher> = match self.matcher {
            Some(m) => m,
            None    => Box::new(FuzzyMatcher::new(self.fuzz)),
        };

        let options = CrawlOptions {
            verbose:      self.verbose,
            follow_links: self.follow_links,
            scope:        self.scope,
            order:        self.order,
            cache:        self.cache,
        };

        Crawler::new(self.rules, matcher, options)
    }
}
