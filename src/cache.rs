//! On-disk snapshot of a finished crawl.
//!
//! One file per crawled root, stored under `<home>/.cache/grover/` and named
//! after the root with every character that is illegal in a file name
//! replaced by `%`. The file holds one full path per line.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::entry::FileRecord;
use crate::error::GroverError;

/// Sub-directory of `~/.cache` owned by grover.
pub const CACHE_APP_DIR: &str = "grover";

const RESERVED: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replace every reserved filename character with `%`, one for one.
///
/// ```rust
/// assert_eq!(grover::sanitize_path("C:/Users/me"), "C%%Users%me");
/// ```
pub fn sanitize_path(path: &str) -> String {
    path.chars()
        .map(|c| if RESERVED.contains(&c) { '%' } else { c })
        .collect()
}

/// `<home>/.cache/grover`.
///
/// # Errors
///
/// [`GroverError::NoHomeDirectory`] when the home directory cannot be found.
pub fn default_cache_dir() -> Result<PathBuf, GroverError> {
    dirs::home_dir()
        .map(|home| home.join(".cache").join(CACHE_APP_DIR))
        .ok_or(GroverError::NoHomeDirectory)
}

/// Location of the cache file for `root` inside `cache_dir`.
///
/// The name is derived from the canonical form of `root`, so `.` and an
/// absolute spelling of the same directory share one cache file while `.`
/// in two different working directories do not. A root that cannot be
/// canonicalized (it does not exist) is named as given.
pub fn cache_file(cache_dir: &Path, root: &Path) -> PathBuf {
    let root = fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let name = sanitize_path(&root.to_string_lossy());
    cache_dir.join(format!("{name}.txt"))
}

/// Write the full path of every record, one per line, to the cache file for
/// `root`. Creates `cache_dir` if needed and truncates any previous cache.
///
/// # Errors
///
/// [`GroverError::CacheDirectory`] if the directory cannot be created,
/// [`GroverError::CacheFile`] if the file cannot be created or written.
pub fn write_cache(
    cache_dir: &Path,
    root: &Path,
    files: &[FileRecord],
) -> Result<PathBuf, GroverError> {
    fs::create_dir_all(cache_dir).map_err(|source| GroverError::CacheDirectory {
        path: cache_dir.to_path_buf(),
        source,
    })?;

    let path = cache_file(cache_dir, root);
    let file_error = |source: std::io::Error| GroverError::CacheFile {
        path: path.clone(),
        source,
    };

    let mut writer = BufWriter::new(File::create(&path).map_err(file_error)?);
    for record in files {
        writeln!(writer, "{}{}", record.directory, record.name).map_err(file_error)?;
    }
    writer.flush().map_err(file_error)?;

    Ok(path)
}

/// Read back the records cached for `root`, in the order they were written.
///
/// Each line is split after its last path separator into directory and name.
/// Blank lines are skipped.
///
/// # Errors
///
/// [`GroverError::CacheFile`] if the cache file cannot be read.
pub fn read_cache(cache_dir: &Path, root: &Path) -> Result<Vec<FileRecord>, GroverError> {
    let path = cache_file(cache_dir, root);
    let text = fs::read_to_string(&path).map_err(|source| GroverError::CacheFile {
        path: path.clone(),
        source,
    })?;

    Ok(text
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| match line.rfind(std::path::is_separator) {
            Some(i) => FileRecord::new(&line[i + 1..], &line[..=i]),
            None => FileRecord::new(line, ""),
        })
        .collect())
}

/// Delete the cache file for `root`. Returns `false` if there was none.
///
/// # Errors
///
/// [`GroverError::CacheFile`] if the file exists but cannot be removed.
pub fn clear_cache(cache_dir: &Path, root: &Path) -> Result<bool, GroverError> {
    let path = cache_file(cache_dir, root);
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(GroverError::CacheFile { path, source }),
    }
}
