pub mod json;
pub mod yaml;

pub use json::JsonFormatter;
pub use yaml::YamlFormatter;

use anyhow::Result;
use std::path::Path;

use crate::core::records::Document;

/// Output document flavours.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }

    pub fn extension(self) -> &'static str {
        self.as_str()
    }

    pub fn write(self, document: &Document, output_path: &Path) -> Result<()> {
        match self {
            OutputFormat::Yaml => YamlFormatter::new().format_to_file(document, output_path),
            OutputFormat::Json => JsonFormatter::new().format_to_file(document, output_path),
        }
    }
}
