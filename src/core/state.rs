use super::records::{ClassRecord, ConditionalRecord, Record};
use super::scope::ScopeStack;
use crate::error::{Diagnostic, DiagnosticKind, Result};

/// Records and diagnostics produced by one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    pub records: Vec<Record>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Mutable context threaded through every classifier and extractor call.
#[derive(Debug, Default)]
pub struct ScanState {
    next_idx: usize,
    scopes: ScopeStack,
    access: Option<String>,
    /// Position where the current `friend` declaration ends
    friend_until: Option<usize>,
    diagnostics: Vec<Diagnostic>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next document-wide record index.
    pub fn next_idx(&mut self) -> usize {
        let idx = self.next_idx;
        self.next_idx += 1;
        idx
    }

    pub fn emit(&mut self, record: Record) {
        self.scopes.push_record(record);
    }

    pub fn access(&self) -> Option<&str> {
        self.access.as_deref()
    }

    pub fn set_access(&mut self, access: impl Into<String>) {
        self.access = Some(access.into());
    }

    pub fn class_path(&self) -> Vec<String> {
        self.scopes.class_path()
    }

    pub fn class_depth(&self) -> usize {
        self.scopes.class_depth()
    }

    pub fn conditional_depth(&self) -> usize {
        self.scopes.conditional_depth()
    }

    /// Opens a class body. Access starts out unset inside it.
    pub fn open_class(&mut self, record: ClassRecord, body_end: usize) {
        let saved = self.access.take();
        self.scopes.open_class(record, body_end, saved);
    }

    /// Closes class bodies that ended before `pos` and restores the access
    /// value of the enclosing scope.
    pub fn close_classes(&mut self, pos: usize) -> Result<()> {
        if let Some(restored) = self.scopes.close_classes_ending_at(pos)? {
            self.access = restored;
        }
        Ok(())
    }

    pub fn open_conditional(&mut self, record: ConditionalRecord, line: usize) {
        self.scopes.open_conditional(record, line);
    }

    pub fn close_conditional(&mut self, line: usize, directive: &str) -> Result<()> {
        self.scopes.close_conditional(line, directive)
    }

    pub fn mark_friend(&mut self, until: usize) {
        self.friend_until = Some(until);
    }

    /// Consumes a pending `friend` marker.
    pub fn take_friend(&mut self) -> bool {
        self.friend_until.take().is_some()
    }

    pub fn expire_friend(&mut self, pos: usize) {
        if self.friend_until.is_some_and(|until| pos >= until) {
            self.friend_until = None;
        }
    }

    /// Records a best-effort finding. `line` is 0-based.
    pub fn diagnose(&mut self, line: usize, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            line: line + 1,
            kind,
        };
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn finish(self) -> Result<ScanOutput> {
        let records = self.scopes.finish()?;
        Ok(ScanOutput {
            records,
            diagnostics: self.diagnostics,
        })
    }
}
