use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong in grover.
///
/// None of these abort a crawl. [`Crawler::crawl`](crate::Crawler::crawl)
/// collects them into [`CrawlReport::errors`](crate::CrawlReport::errors)
/// and keeps going; the standalone loaders return them to the caller.
#[derive(Error, Debug)]
pub enum GroverError {
    // Traversal
    #[error("cannot list directory {}", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read directory entry in {}", path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config
    #[error("cannot read ignore file {}", path.display())]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Cache
    #[error("home directory unavailable")]
    NoHomeDirectory,

    #[error("cannot create cache directory {}", path.display())]
    CacheDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot access cache file {}", path.display())]
    CacheFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GroverError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::ListDirectory { path, .. }
            | Self::ReadEntry { path, .. }
            | Self::IgnoreFile { path, .. }
            | Self::CacheDirectory { path, .. }
            | Self::CacheFile { path, .. } => Some(path),
            Self::NoHomeDirectory => None,
        }
    }

    /// Whether the underlying cause is a missing file or directory.
    ///
    /// The CLI uses this to tell "no cache yet" apart from a real failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ListDirectory { source, .. }
            | Self::ReadEntry { source, .. }
            | Self::IgnoreFile { source, .. }
            | Self::CacheDirectory { source, .. }
            | Self::CacheFile { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            Self::NoHomeDirectory => false,
        }
    }
}
