/// A single file discovered by a [`Crawler`](crate::Crawler).
///
/// Records are created once, while the crawler lists the directory that
/// contains them, and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// The file's base name.
    pub name: String,

    /// The containing directory, always ending with a path separator.
    pub directory: String,
}

impl FileRecord {
    pub(crate) fn new(name: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory: directory.into(),
        }
    }

    /// `directory` followed by `name`. No separator is inserted: `directory`
    /// already ends with one.
    pub fn full_path(&self) -> String {
        format!("{}{}", self.directory, self.name)
    }
}

/// Extension of a file name: everything from the last `.`, dot included.
pub(crate) fn extension_of(name: &str) -> &str {
    name.rfind('.').map(|i| &name[i..]).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_path_concatenates() {
        let record = FileRecord::new("a.txt", "/root/sub/");
        assert_eq!(record.full_path(), "/root/sub/a.txt");
    }

    #[test]
    fn extension_from_last_dot() {
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of(".bashrc"), ".bashrc");
        assert_eq!(extension_of("Makefile"), "");
    }
}
