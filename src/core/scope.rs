use super::records::{ClassRecord, ConditionalRecord, Record};
use crate::error::{Result, ScanError};

/// An open, not yet closed nesting context.
#[derive(Debug)]
enum ScopeFrame {
    Conditional {
        record: ConditionalRecord,
        /// 1-based line of the opening directive
        opened_at: usize,
    },
    Class {
        record: ClassRecord,
        /// Flattened position right after the member list
        body_end: usize,
        /// Access value of the enclosing scope, restored on close
        saved_access: Option<String>,
    },
}

/// Explicit stack of open conditional branches and class bodies.
///
/// Closed frames are appended to their parent (or the document root), so
/// the finished tree mirrors the nesting of the source.
#[derive(Debug, Default)]
pub struct ScopeStack {
    root: Vec<Record>,
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finished record to the innermost open scope.
    pub fn push_record(&mut self, record: Record) {
        match self.frames.last_mut() {
            Some(ScopeFrame::Conditional { record: open, .. }) => open.records.push(record),
            Some(ScopeFrame::Class { record: open, .. }) => open.members.push(record),
            None => self.root.push(record),
        }
    }

    /// Number of currently open conditional blocks.
    pub fn conditional_depth(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| matches!(f, ScopeFrame::Conditional { .. }))
            .count()
    }

    /// Number of currently open class bodies.
    pub fn class_depth(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| matches!(f, ScopeFrame::Class { .. }))
            .count()
    }

    pub fn open_conditional(&mut self, record: ConditionalRecord, line: usize) {
        self.frames.push(ScopeFrame::Conditional {
            record,
            opened_at: line,
        });
    }

    /// Closes the innermost conditional; it must be on top of the stack.
    pub fn close_conditional(&mut self, line: usize, directive: &str) -> Result<()> {
        match self.frames.pop() {
            Some(ScopeFrame::Conditional { record, .. }) => {
                self.push_record(Record::Conditional(record));
                Ok(())
            }
            other => {
                if let Some(frame) = other {
                    self.frames.push(frame);
                }
                Err(ScanError::UnbalancedDirective {
                    line,
                    directive: directive.to_string(),
                })
            }
        }
    }

    /// Class path of the open class bodies, outermost first: each class
    /// contributes its name followed by its base clause, if any.
    pub fn class_path(&self) -> Vec<String> {
        let mut path = Vec::new();
        for frame in &self.frames {
            if let ScopeFrame::Class { record, .. } = frame {
                path.push(record.name.clone());
                if let Some(base) = &record.base {
                    path.push(base.clone());
                }
            }
        }
        path
    }

    pub fn open_class(&mut self, record: ClassRecord, body_end: usize, saved_access: Option<String>) {
        self.frames.push(ScopeFrame::Class {
            record,
            body_end,
            saved_access,
        });
    }

    /// Closes every class body that ends at or before `pos`, innermost first.
    ///
    /// Returns the access value to restore when at least one body closed.
    pub fn close_classes_ending_at(&mut self, pos: usize) -> Result<Option<Option<String>>> {
        let mut restored = None;
        loop {
            match self.frames.last() {
                Some(ScopeFrame::Class { body_end, .. }) if *body_end <= pos => {
                    if let Some(ScopeFrame::Class {
                        record,
                        saved_access,
                        ..
                    }) = self.frames.pop()
                    {
                        restored = Some(saved_access);
                        self.push_record(Record::Class(record));
                    }
                }
                Some(ScopeFrame::Conditional { opened_at, .. }) => {
                    let enclosing_class_closed = self.frames.iter().rev().any(|f| {
                        matches!(f, ScopeFrame::Class { body_end, .. } if *body_end <= pos)
                    });
                    if enclosing_class_closed {
                        return Err(ScanError::UnterminatedConditional { line: *opened_at });
                    }
                    return Ok(restored);
                }
                _ => return Ok(restored),
            }
        }
    }

    /// Finishes the document. Any conditional still open is a structural error.
    pub fn finish(mut self) -> Result<Vec<Record>> {
        if let Some(line) = self.frames.iter().find_map(|f| match f {
            ScopeFrame::Conditional { opened_at, .. } => Some(*opened_at),
            ScopeFrame::Class { .. } => None,
        }) {
            return Err(ScanError::UnterminatedConditional { line });
        }
        while let Some(frame) = self.frames.pop() {
            if let ScopeFrame::Class { record, .. } = frame {
                self.push_record(Record::Class(record));
            }
        }
        Ok(self.root)
    }
}
