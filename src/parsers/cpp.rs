use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tree_sitter::{Parser, Tree};

use crate::error::{Result, ScanError};

/// tree-sitter parser set up with the C++ grammar, which also accepts C
/// headers.
pub struct HeaderParser {
    parser: Parser,
}

impl HeaderParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(tree_sitter_cpp::language())
            .map_err(|err| ScanError::parse(err.to_string()))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| ScanError::parse("tree-sitter returned no tree"))
    }

    /// Reads and parses a header, returning its text with the tree.
    pub fn parse_file(&mut self, file_path: &Path) -> Result<(String, Tree)> {
        let source = read_file_optimized(file_path)?;
        let tree = self.parser.parse(&source, None).ok_or_else(|| {
            ScanError::parse(format!("Failed to parse file: {}", file_path.display()))
        })?;
        Ok((source, tree))
    }
}

/// Buffered read with the string pre-sized from file metadata. Bytes that
/// are not UTF-8 are replaced rather than rejected.
fn read_file_optimized(file_path: &Path) -> Result<String> {
    let file = File::open(file_path)?;
    let file_size = file.metadata()?.len() as usize;

    let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
    let mut content = Vec::with_capacity(file_size);
    reader.read_to_end(&mut content)?;

    Ok(match String::from_utf8(content) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}
