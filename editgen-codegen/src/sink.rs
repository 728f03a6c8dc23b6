//! Destinations for generated files.

use crate::artifact::GeneratedFile;
use crate::error::CodegenError;
use std::path::{Path, PathBuf};

/// Receives rendered files.
pub trait FileSink {
    /// Writes one file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be stored.
    fn write_file(&mut self, file: &GeneratedFile) -> Result<(), CodegenError>;
}

/// Writes files below a root directory, one directory per package segment.
///
/// The leading `crate` segment is dropped, so package `crate::forms` lands
/// in `<root>/forms/`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing below `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns where `file` is written.
    #[must_use]
    pub fn path_for(&self, file: &GeneratedFile) -> PathBuf {
        let mut path = self.root.clone();
        let mut segments = file.package_name.split("::").filter(|s| !s.is_empty()).peekable();
        if segments.peek() == Some(&"crate") {
            segments.next();
        }
        for segment in segments {
            path.push(segment);
        }
        path.push(&file.file_name);
        path
    }
}

impl FileSink for DirectorySink {
    fn write_file(&mut self, file: &GeneratedFile) -> Result<(), CodegenError> {
        let path = self.path_for(file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &file.source_text)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// Keeps files in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<GeneratedFile>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Files received so far, in write order.
    #[must_use]
    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    /// Finds a file by package and file name.
    #[must_use]
    pub fn get(&self, package_name: &str, file_name: &str) -> Option<&GeneratedFile> {
        self.files
            .iter()
            .find(|f| f.package_name == package_name && f.file_name == file_name)
    }

    /// Consumes the sink, returning its files.
    #[must_use]
    pub fn into_files(self) -> Vec<GeneratedFile> {
        self.files
    }
}

impl FileSink for MemorySink {
    fn write_file(&mut self, file: &GeneratedFile) -> Result<(), CodegenError> {
        self.files.push(file.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(package_name: &str) -> GeneratedFile {
        GeneratedFile {
            package_name: package_name.to_string(),
            file_name: "forms_point_editor.rs".to_string(),
            source_text: "// generated\n".to_string(),
            required_imports: Vec::new(),
        }
    }

    #[test]
    fn test_directory_sink_paths() {
        let sink = DirectorySink::new("/out");
        assert_eq!(
            sink.path_for(&file("crate::ui::forms")),
            Path::new("/out/ui/forms/forms_point_editor.rs")
        );
        assert_eq!(
            sink.path_for(&file("crate")),
            Path::new("/out/forms_point_editor.rs")
        );
        assert_eq!(
            sink.path_for(&file("app::forms")),
            Path::new("/out/app/forms/forms_point_editor.rs")
        );
    }

    #[test]
    fn test_directory_sink_writes_files() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut sink = DirectorySink::new(dir.path());
        sink.write_file(&file("crate::forms")).expect("write");

        let written = std::fs::read_to_string(dir.path().join("forms").join("forms_point_editor.rs"))
            .expect("read back");
        assert_eq!(written, "// generated\n");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::new();
        sink.write_file(&file("crate::forms")).expect("write");
        assert_eq!(sink.files().len(), 1);
        assert!(sink.get("crate::forms", "forms_point_editor.rs").is_some());
        assert!(sink.get("crate::other", "forms_point_editor.rs").is_none());
        assert_eq!(sink.into_files().len(), 1);
    }
}
