use anyhow::Result;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Header file extensions picked up when walking a directory.
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["h", "hh", "hpp", "hxx", "h++"];

/// Finds the header files named by the command line.
pub struct HeaderScanner {
    extensions: HashSet<String>,
}

impl HeaderScanner {
    pub fn new() -> Self {
        Self::with_extensions(DEFAULT_EXTENSIONS)
    }

    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
        }
    }

    /// Files are taken as given, even if they do not exist; directories are
    /// walked for headers. Results come back sorted.
    pub fn collect(&self, inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut headers = Vec::new();
        for input in inputs {
            if input.is_dir() {
                headers.extend(self.scan_directory(input)?);
            } else {
                headers.push(input.clone());
            }
        }
        headers.sort();
        headers.dedup();
        Ok(headers)
    }

    pub fn scan_directory(&self, root_path: &Path) -> Result<Vec<PathBuf>> {
        // Collect all entries first for parallel filtering
        let entries: Vec<_> = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.path().is_file())
            .collect();

        let mut files: Vec<PathBuf> = entries
            .par_iter()
            .filter(|entry| self.is_header(entry.path()))
            .map(|entry| entry.path().to_path_buf())
            .collect();
        files.sort();

        log::debug!("{}: {} headers", root_path.display(), files.len());
        Ok(files)
    }

    pub fn is_header(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
            .unwrap_or(false)
    }
}

impl Default for HeaderScanner {
    fn default() -> Self {
        Self::new()
    }
}
