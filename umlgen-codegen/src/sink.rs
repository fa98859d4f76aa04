//! Output sinks for generated files.
//!
//! All paths handed to a sink are relative to the sink's root.

use crate::error::CodegenError;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Destination of generated directories and files.
pub trait OutputSink {
    /// Creates a directory (and its parents).
    ///
    /// # Errors
    /// Returns `CodegenError::CreateDirectory` if the directory cannot be
    /// created.
    fn create_dir(&mut self, path: &Path) -> Result<(), CodegenError>;

    /// Writes a file, replacing any previous content.
    ///
    /// # Errors
    /// Returns `CodegenError::WriteFile` if the file cannot be written.
    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), CodegenError>;
}

/// Sink writing below a base directory on disk.
#[derive(Debug, Clone)]
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// Creates a sink rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the base directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for FsSink {
    fn create_dir(&mut self, path: &Path) -> Result<(), CodegenError> {
        let full = self.root.join(path);
        std::fs::create_dir_all(&full)
            .map_err(|source| CodegenError::CreateDirectory { path: full, source })
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), CodegenError> {
        let full = self.root.join(path);
        std::fs::write(&full, contents)
            .map_err(|source| CodegenError::WriteFile { path: full, source })
    }
}

/// Sink collecting output in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the created directories.
    #[must_use]
    pub fn dirs(&self) -> &BTreeSet<PathBuf> {
        &self.dirs
    }

    /// Returns the written files.
    #[must_use]
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    /// Returns the content of one file.
    #[must_use]
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Consumes the sink and returns the written files.
    #[must_use]
    pub fn into_files(self) -> BTreeMap<PathBuf, String> {
        self.files
    }
}

impl OutputSink for MemorySink {
    fn create_dir(&mut self, path: &Path) -> Result<(), CodegenError> {
        self.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&mut self, path: &Path, contents: &str) -> Result<(), CodegenError> {
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            if !self.dirs.contains(parent) {
                return Err(CodegenError::WriteFile {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "parent directory was not created",
                    ),
                });
            }
        }
        self.files.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_sink_writes_below_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut sink = FsSink::new(dir.path());

        sink.create_dir(Path::new("Project/App")).expect("create dir");
        sink.write_file(Path::new("Project/App/User.php"), "<?php\n")
            .expect("write file");

        let written = std::fs::read_to_string(dir.path().join("Project/App/User.php"))
            .expect("read back");
        assert_eq!(written, "<?php\n");
    }

    #[test]
    fn test_fs_sink_write_error_carries_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut sink = FsSink::new(dir.path());

        let err = sink
            .write_file(Path::new("missing/User.php"), "x")
            .unwrap_err();
        match err {
            CodegenError::WriteFile { path, .. } => {
                assert!(path.ends_with("missing/User.php"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fs_sink_create_dir_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("blocker"), "").expect("write blocker");
        let mut sink = FsSink::new(dir.path());

        assert!(matches!(
            sink.create_dir(Path::new("blocker/sub")),
            Err(CodegenError::CreateDirectory { .. })
        ));
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.create_dir(Path::new("Project")).expect("create dir");
        sink.write_file(Path::new("Project/A.php"), "a").expect("write");

        assert_eq!(sink.file("Project/A.php"), Some("a"));
        assert!(sink.dirs().contains(Path::new("Project")));
        assert!(sink.write_file(Path::new("Other/B.php"), "b").is_err());
        assert_eq!(sink.into_files().len(), 1);
    }
}
