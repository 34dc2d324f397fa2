use std::path::PathBuf;
use std::time::Duration;

use crate::entry::FileRecord;
use crate::error::GroverError;

/// A file that scored above the threshold in [`Crawler::find`](crate::Crawler::find).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    /// The matched file, borrowed from the crawler's collection.
    pub record: &'a FileRecord,

    /// The matcher's score for this file.
    pub confidence: f64,
}

/// Which part of a [`FileRecord`] the query is scored against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchScope {
    /// The file name only.
    #[default]
    Name,

    /// The containing directory string only.
    Path,

    /// Both, keeping the higher of the two scores.
    Both,
}

/// Order of the list returned by [`Crawler::find`](crate::Crawler::find).
///
/// The default is `Ascending`: the weakest match comes first and the
/// strongest last. Use `Descending` for best-first output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Stable sort by confidence: ties keep discovery order.
    pub(crate) fn sort(self, matches: &mut [Match<'_>]) {
        match self {
            Self::Ascending => matches.sort_by(|a, b| a.confidence.total_cmp(&b.confidence)),
            Self::Descending => matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence)),
        }
    }
}

/// What a single [`Crawler::crawl`](crate::Crawler::crawl) did.
#[derive(Debug)]
pub struct CrawlReport {
    /// Scan statistics.
    pub stats: ScanStats,

    /// Where the results were cached, if the cache step succeeded.
    /// `None` when caching is disabled or failed.
    pub cache_file: Option<PathBuf>,

    /// Non-fatal errors met along the way (unlistable directories, cache
    /// failures). The crawl always runs to completion regardless.
    pub errors: Vec<GroverError>,
}

/// Performance statistics for a completed crawl.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Files recorded (not counting ignored ones).
    pub files: usize,

    /// Directories successfully listed.
    pub dirs: usize,

    /// Directories skipped by a directory rule.
    pub ignored_dirs: usize,

    /// Files skipped by an extension rule.
    pub ignored_files: usize,

    /// Wall-clock time of the traversal, cache write excluded.
    pub duration: Duration,

    /// Total entries scanned per second. Equals
    /// `(files + dirs) / duration.as_secs_f64()`, clamped to 0 on
    /// zero-duration runs.
    pub entries_per_sec: usize,
}

impl ScanStats {
    /// Fill in `duration` and derive `entries_per_sec` from the counts.
    pub(crate) fn finish(&mut self, duration: Duration) {
        let total = self.files + self.dirs;
        self.duration = duration;
        self.entries_per_sec = if duration.as_secs_f64() > 0.0 {
            (total as f64 / duration.as_secs_f64()) as usize
        } else {
            0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_orders_are_stable() {
        let a = FileRecord::new("a", "/");
        let b = FileRecord::new("b", "/");
        let c = FileRecord::new("c", "/");
        let mut matches = vec![
            Match { record: &a, confidence: 0.9 },
            Match { record: &b, confidence: 0.7 },
            Match { record: &c, confidence: 0.9 },
        ];

        SortOrder::Ascending.sort(&mut matches);
        let names: Vec<_> = matches.iter().map(|m| m.record.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);

        SortOrder::Descending.sort(&mut matches);
        let names: Vec<_> = matches.iter().map(|m| m.record.name.as_str()).collect();
        assert_eq!(names, ["a", "c", "b"]);
    }

    #[test]
    fn zero_duration_has_zero_rate() {
        let mut stats = ScanStats { files: 10, dirs: 2, ..Default::default() };
        stats.finish(Duration::ZERO);
        assert_eq!(stats.entries_per_sec, 0);

        stats.finish(Duration::from_secs(2));
        assert_eq!(stats.entries_per_sec, 6);
    }
}
