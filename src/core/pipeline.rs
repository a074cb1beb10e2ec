use anyhow::{Context, Result};
use dashmap::DashSet;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use super::discovery::DEFAULT_EXTENSIONS;
use super::flatten::flatten;
use super::records::Document;
use super::scanner::scan;
use crate::error::Diagnostic;
use crate::formatters::OutputFormat;
use crate::parsers::HeaderParser;

/// Settings for one run over a set of headers.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    /// Follow quoted includes to the headers they name
    pub follow_includes: bool,
    pub extensions: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("out"),
            format: OutputFormat::Yaml,
            follow_includes: true,
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl PipelineConfig {
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_follow_includes(mut self, follow_includes: bool) -> Self {
        self.follow_includes = follow_includes;
        self
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// `<output_dir>/<lower-cased stem>.<format extension>`
    pub fn output_path(&self, header: &Path) -> PathBuf {
        let stem = header
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "header".to_string());
        self.output_dir
            .join(format!("{}.{}", stem, self.format.extension()))
    }
}

/// Everything one header produced.
#[derive(Debug, Clone)]
pub struct HeaderOutput {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of a run, merged across all root headers.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
    pub diagnostics: usize,
}

impl RunSummary {
    fn merge(mut self, other: RunSummary) -> Self {
        self.written.extend(other.written);
        self.missing.extend(other.missing);
        self.failed.extend(other.failed);
        self.diagnostics += other.diagnostics;
        self
    }
}

/// Reads, parses and extracts one header.
pub fn extract_file(path: &Path) -> Result<HeaderOutput> {
    let mut parser = HeaderParser::new()?;
    let (source, tree) = parser
        .parse_file(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let nodes = flatten(tree.root_node());
    let output = scan(&nodes, source.as_bytes())
        .with_context(|| format!("Failed to extract {}", path.display()))?;

    Ok(HeaderOutput {
        document: Document::new(path.display().to_string(), output.records),
        diagnostics: output.diagnostics,
    })
}

/// Drives extraction over root headers and, unless disabled, the local
/// headers they include.
pub struct Pipeline {
    config: PipelineConfig,
    visited: DashSet<PathBuf>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            visited: DashSet::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes every root in parallel. Each header in the include graph
    /// is handled at most once.
    pub fn run(&self, roots: &[PathBuf]) -> Result<RunSummary> {
        fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.config.output_dir.display()
            )
        })?;

        let summary = roots
            .par_iter()
            .map(|root| self.process_tree(root))
            .reduce(RunSummary::default, RunSummary::merge);
        Ok(summary)
    }

    fn process_tree(&self, root: &Path) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut pending = vec![root.to_path_buf()];

        while let Some(path) = pending.pop() {
            if !self.visited.insert(visit_key(&path)) {
                continue;
            }
            if !path.is_file() {
                log::error!("{}: no such file", path.display());
                summary.missing.push(path);
                continue;
            }

            match self.process_file(&path) {
                Ok((output, written)) => {
                    summary.diagnostics += output.diagnostics.len();
                    summary.written.push(written);
                    if self.config.follow_includes {
                        let mut includes = local_includes(&path, &output.document);
                        includes.reverse();
                        pending.extend(includes);
                    }
                }
                Err(err) => {
                    log::error!("{}: {:#}", path.display(), err);
                    summary.failed.push((path, format!("{:#}", err)));
                }
            }
        }

        summary
    }

    /// Extracts one header and writes its document.
    pub fn process_file(&self, path: &Path) -> Result<(HeaderOutput, PathBuf)> {
        log::info!("Processing {}", path.display());
        let output = extract_file(path)?;
        let output_path = self.config.output_path(path);
        self.config
            .format
            .write(&output.document, &output_path)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        log::debug!(
            "{} -> {} ({} diagnostics)",
            path.display(),
            output_path.display(),
            output.diagnostics.len()
        );
        Ok((output, output_path))
    }
}

/// Quoted includes resolved against the including header's directory.
pub fn local_includes(header: &Path, document: &Document) -> Vec<PathBuf> {
    let base = header.parent().unwrap_or_else(|| Path::new(""));
    document
        .includes()
        .into_iter()
        .filter(|include| !include.system)
        .filter_map(|include| include.local_path())
        .map(|relative| base.join(relative))
        .collect()
}

fn visit_key(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
