//! # HDRDECL
//!
//! Declarative description of C and C++ header surfaces for binding
//! generators.
//!
//! A header is parsed with tree-sitter, the syntax tree is flattened into a
//! pre-order `(depth, node)` sequence, and a single forward scan turns that
//! sequence into typed records: functions, variables, typedefs, classes,
//! enums, preprocessor conditionals, includes, macros and comments.
//!
//! ## Output Formats
//!
//! - **YAML**: nested, indentation-based document, one per header
//! - **JSON**: the same record tree through serde
//!
//! Every record carries an `idx`; taken in document order, nested records
//! included, these run `0, 1, 2, ...` without gaps.

pub mod core;
pub mod error;
pub mod extractors;
pub mod formatters;
pub mod parsers;

pub use crate::core::records::Document;
pub use crate::core::state::ScanOutput;
pub use error::{Diagnostic, DiagnosticKind, ScanError};

use crate::parsers::HeaderParser;

/// Parses header text and extracts its records.
pub fn extract_source(source: &str) -> error::Result<ScanOutput> {
    let mut parser = HeaderParser::new()?;
    let tree = parser.parse(source)?;
    let nodes = crate::core::flatten(tree.root_node());
    crate::core::scan(&nodes, source.as_bytes())
}

/// Like [`extract_source`], wrapped in a [`Document`] named `filename`.
pub fn extract_document(filename: &str, source: &str) -> error::Result<Document> {
    let output = extract_source(source)?;
    Ok(Document::new(filename, output.records))
}
