use std::path::{Path, PathBuf};

use eyre::Result;

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already held identical content and was left untouched
    Unchanged,
}

/// A generated file to be written.
///
/// Generated files are always overwritten; identical content is skipped so
/// file timestamps only move when the output actually changes.
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Check if the file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Write the file, creating parent directories as needed.
    pub fn write(&self) -> Result<WriteResult> {
        if matches!(std::fs::read_to_string(&self.path), Ok(existing) if existing == self.content) {
            return Ok(WriteResult::Unchanged);
        }
        write_file(&self.path, &self.content)?;
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("schema.rs");

        let result = File::new(&path, "nested").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_write_overwrites_changed_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("database.ts");
        fs::write(&path, "original").unwrap();

        let result = File::new(&path, "updated").write().unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_write_skips_identical_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("database.ts");
        fs::write(&path, "same").unwrap();

        let result = File::new(&path, "same").write().unwrap();

        assert_eq!(result, WriteResult::Unchanged);
    }

    #[test]
    fn test_file_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("test.txt");

        let file = File::new(&path, "content");
        assert!(!file.exists());

        file.write().unwrap();
        assert!(file.exists());
    }
}
