//! Generated output and writing it to disk.

use std::path::Path;
use tracing::info;

use crate::error::{CodegenError, Result};

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// File path relative to the output directory.
    pub path: String,
    /// File content.
    pub content: String,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Every file of one generation run, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedProject {
    pub files: Vec<GeneratedFile>,
}

impl GeneratedProject {
    pub fn push(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.push(GeneratedFile::new(path, content));
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(|f| f.content.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write every file under `dir`, creating it if needed. Existing files
    /// are overwritten.
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(|source| CodegenError::Write {
            path: dir.to_path_buf(),
            source,
        })?;

        for file in &self.files {
            let path = dir.join(&file.path);
            std::fs::write(&path, &file.content).map_err(|source| CodegenError::Write {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "wrote");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("generated");

        let mut project = GeneratedProject::default();
        project.push("Button.tsx", "export const Button = () => null;\n");
        project.push("style.css", "");
        project.write_to(&out).unwrap();

        assert_eq!(
            std::fs::read_to_string(out.join("Button.tsx")).unwrap(),
            "export const Button = () => null;\n"
        );
        assert!(out.join("style.css").exists());
        assert_eq!(project.get("style.css"), Some(""));
        assert_eq!(project.paths().collect::<Vec<_>>(), vec!["Button.tsx", "style.css"]);
    }

    #[test]
    fn test_write_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("taken");
        std::fs::write(&blocker, "").unwrap();

        let mut project = GeneratedProject::default();
        project.push("Button.tsx", "");
        let err = project.write_to(&blocker).unwrap_err();
        assert!(matches!(err, CodegenError::Write { ref path, .. } if path == &blocker));
    }
}
