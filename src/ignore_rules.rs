use std::fs;
use std::path::Path;

use crate::entry::extension_of;
use crate::error::GroverError;

/// Name of the project-local ignore file, looked up in the current directory.
pub const IGNORE_FILE_NAME: &str = ".groverignore";

/// Exclusions applied during a crawl.
///
/// Each non-blank line of an ignore file is one rule. A line starting with
/// `*` is an extension rule (`*.log` ignores every file ending in `.log`);
/// any other line is a directory rule, matched against the final segment
/// of a directory path. There is no escaping and no comment syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreRules {
    directories: Vec<String>,
    extensions: Vec<String>,
}

impl IgnoreRules {
    /// An empty rule set. Ignores nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify every line of `text` into a rule. Blank lines are skipped.
    pub fn parse(text: &str) -> Self {
        let mut rules = Self::new();
        for line in text.lines() {
            rules.add(line);
        }
        rules
    }

    /// Read and parse the ignore file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`GroverError::IgnoreFile`] when the file cannot be read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GroverError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| GroverError::IgnoreFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Add one rule, classified by its first character.
    pub fn add(&mut self, rule: &str) {
        if rule.is_empty() {
            return;
        }
        if rule.starts_with('*') {
            self.extensions.push(extension_of(rule).to_string());
        } else {
            self.directories.push(rule.to_string());
        }
    }

    /// Whether a directory whose final path segment is `name` is excluded.
    pub fn ignores_directory(&self, name: &str) -> bool {
        self.directories.iter().any(|d| d == name)
    }

    /// Whether a file named `name` is excluded by an extension rule.
    pub fn ignores_file(&self, name: &str) -> bool {
        let ext = extension_of(name);
        self.extensions.iter().any(|e| e == ext)
    }

    pub fn directory_rules(&self) -> &[String] {
        &self.directories
    }

    /// Extension rules, stored as the extension itself (`.log` for `*.log`).
    pub fn extension_rules(&self) -> &[String] {
        &self.extensions
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.extensions.is_empty()
    }
}
