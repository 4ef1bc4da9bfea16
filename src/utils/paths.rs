use crate::utils::errors::{ListError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const PUBLISHERS_DIR: &str = "Publishers";
const ENTITY_FILE: &str = "entity.json";
const CERTIFICATE_EXTENSION: &str = "pem";
pub const DEFAULT_OUTPUT_NAME: &str = "verified-news-publishers-list";

/// Filesystem layout of one generator run
#[derive(Debug, Clone)]
pub struct ListPaths {
    root: PathBuf,
    output_dir: PathBuf,
    output_name: String,
}

impl ListPaths {
    pub fn new(
        root: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        output_name: impl Into<String>,
    ) -> Self {
        Self {
            root: root.into(),
            output_dir: output_dir.into(),
            output_name: output_name.into(),
        }
    }

    /// Get the publishers directory: <root>/Publishers/
    pub fn publishers_dir(&self) -> PathBuf {
        self.root.join(PUBLISHERS_DIR)
    }

    /// Get the metadata file of a publisher: <publisher>/entity.json
    pub fn entity_file(publisher_dir: &Path) -> PathBuf {
        publisher_dir.join(ENTITY_FILE)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Get the PEM bundle path: <output_dir>/<name>.pem
    pub fn pem_list(&self) -> PathBuf {
        self.output_dir.join(format!("{}.pem", self.output_name))
    }

    /// Get the JSON directory path: <output_dir>/<name>.json
    pub fn json_list(&self) -> PathBuf {
        self.output_dir.join(format!("{}.json", self.output_name))
    }

    /// Sibling path used while an artifact is being written
    pub fn temp_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        path.with_file_name(name)
    }

    /// List the publisher directories, sorted by name
    pub fn publisher_dirs(&self) -> Result<Vec<PathBuf>> {
        let publishers_dir = self.publishers_dir();
        if !publishers_dir.is_dir() {
            return Err(ListError::Config(format!(
                "Publishers directory not found: {}",
                publishers_dir.display()
            )));
        }

        let mut dirs = Vec::new();
        for entry in fs::read_dir(&publishers_dir)? {
            let path = entry?.path();
            // Follows symlinks; a dangling link is an error
            if fs::metadata(&path)?.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }

    /// List the certificate files of a publisher, sorted by name
    pub fn certificate_files(publisher_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(publisher_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == CERTIFICATE_EXTENSION)
                && fs::metadata(&path)?.is_file()
            {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}
