use super::classify::{classify, Construct};
use super::cursor::{Cursor, SourceText};
use super::flatten::FlatNode;
use super::records::Record;
use super::state::{ScanOutput, ScanState};
use crate::error::{DiagnosticKind, Result};
use crate::extractors::{classes, function, misc, preproc, typedefs};

/// Single forward pass over a flattened tree.
///
/// Each step closes the class bodies the cursor has left, classifies the
/// node under the cursor and hands it to the matching extractor, which may
/// consume any number of positions.
pub fn scan(nodes: &[FlatNode], source: &[u8]) -> Result<ScanOutput> {
    let source = SourceText::new(source);
    let mut cursor = Cursor::new(nodes);
    let mut state = ScanState::new();

    while let Some(node) = cursor.current() {
        let pos = cursor.pos();
        state.close_classes(pos)?;
        state.expire_friend(pos);

        match classify(&cursor, source) {
            Construct::Directive => preproc::conditional(&mut cursor, source, &mut state)?,
            Construct::PreprocCall => preproc::directive_call(&mut cursor, source, &mut state)?,
            Construct::Include => {
                let record = preproc::include(&mut cursor, source, &mut state)?;
                state.emit(Record::Include(record));
            }
            Construct::Define => {
                let record = preproc::define(&mut cursor, source, &mut state)?;
                state.emit(Record::Define(record));
            }
            Construct::MacroDefine => {
                let record = preproc::macro_define(&mut cursor, source, &mut state)?;
                state.emit(Record::MacroDefine(record));
            }
            Construct::ExternC => preproc::extern_c(&mut cursor, source, &mut state),
            Construct::Friend => {
                let until = cursor
                    .parent_of(pos)
                    .map(|parent| cursor.subtree_end(parent))
                    .unwrap_or_else(|| cursor.subtree_end(pos + 1));
                state.mark_friend(until);
                cursor.advance();
            }
            Construct::Function => {
                match function::extract(&mut cursor, source, &mut state)? {
                    Some(record) => state.emit(Record::Function(record)),
                    None => cursor.advance(),
                }
            }
            Construct::Variable => {
                if !misc::variable(&mut cursor, source, &mut state) && cursor.pos() == pos {
                    cursor.advance();
                }
            }
            Construct::Comment => misc::comment(&mut cursor, source, &mut state),
            Construct::Typedef => {
                let record = typedefs::extract(&mut cursor, source, &mut state)?;
                state.emit(Record::Typedef(record));
            }
            Construct::Class => classes::class_specifier(&mut cursor, source, &mut state),
            Construct::Enum => classes::enum_specifier(&mut cursor, source, &mut state),
            Construct::Access => classes::access_specifier(&mut cursor, source, &mut state),
            Construct::Skip => cursor.seek(cursor.subtree_end(pos)),
            Construct::Noise => cursor.advance(),
            Construct::Unhandled => {
                state.diagnose(
                    node.start_line,
                    DiagnosticKind::UnhandledNode {
                        kind: node.kind_name.clone(),
                        text: first_line(source.text(node)).to_string(),
                    },
                );
                cursor.advance();
            }
        }
    }

    state.close_classes(cursor.len())?;
    log::trace!(
        "end of input with {} open conditionals and {} open classes",
        state.conditional_depth(),
        state.class_depth()
    );
    state.finish()
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kinds::NodeKind;
    use crate::error::DiagnosticKind;

    fn node(depth: usize, kind: &str, bytes: (usize, usize), line: usize) -> FlatNode {
        FlatNode {
            depth,
            kind: NodeKind::from_raw(kind),
            kind_name: kind.to_string(),
            start_byte: bytes.0,
            end_byte: bytes.1,
            start_line: line,
            named: true,
            missing: false,
        }
    }

    #[test]
    fn unknown_named_node_is_diagnosed_and_scanning_continues() {
        let source = b"@weird thing\n// after\n";
        let nodes = vec![
            node(0, "translation_unit", (0, 22), 0),
            node(1, "mystery_construct", (0, 12), 0),
            node(1, "comment", (13, 21), 1),
        ];

        let output = scan(&nodes, source).unwrap();
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].line, 1);
        assert_eq!(
            output.diagnostics[0].kind,
            DiagnosticKind::UnhandledNode {
                kind: "mystery_construct".to_string(),
                text: "@weird thing".to_string(),
            }
        );
        assert!(matches!(&output.records[..], [Record::Comment(c)] if c.text == "after"));
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let output = scan(&[], b"").unwrap();
        assert!(output.records.is_empty());
        assert!(output.diagnostics.is_empty());
    }
}
