use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::core::records::Document;

/// Pretty-printed JSON rendering of the same record tree the YAML
/// formatter writes.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, document: &Document, output_path: &Path) -> Result<()> {
        let mut json_content = self.format_document(document)?;
        json_content.push('\n');
        fs::write(output_path, json_content)?;
        Ok(())
    }

    pub fn format_document(&self, document: &Document) -> Result<String> {
        Ok(serde_json::to_string_pretty(document)?)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}
