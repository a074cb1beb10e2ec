use crate::core::cursor::{Cursor, SourceText};
use crate::core::kinds::NodeKind;
use crate::core::records::{CommentRecord, Record, VariableRecord};
use crate::core::state::ScanState;

pub fn comment(cursor: &mut Cursor<'_>, source: SourceText<'_>, state: &mut ScanState) {
    if let Some(node) = cursor.current() {
        let idx = state.next_idx();
        state.emit(Record::Comment(CommentRecord {
            idx,
            text: clean_comment(source.text(node)),
        }));
    }
    cursor.advance();
}

/// Drops comment markers, expands tabs and trims.
pub fn clean_comment(text: &str) -> String {
    let text = text.strip_prefix("/*").unwrap_or(text);
    let text = text.strip_suffix("*/").unwrap_or(text);
    let text = text.strip_prefix("//").unwrap_or(text);
    text.replace('\t', " ").trim().to_string()
}

/// Plain variable declaration introduced by the leading type token under
/// the cursor. Returns `false` when no variable name could be found.
pub fn variable(cursor: &mut Cursor<'_>, source: SourceText<'_>, state: &mut ScanState) -> bool {
    let pos = cursor.pos();
    let Some(node) = cursor.current() else {
        return false;
    };
    let ty = source.text(node).to_string();

    if let Some(parent) = cursor.parent_of(pos) {
        if cursor.kind_at(parent).is_some_and(NodeKind::is_declaration) {
            return declaration_variables(cursor, source, state, parent, ty);
        }
    }

    // Outside a declaration node: first name on the same line
    let line = cursor.line_at(pos);
    let mut p = cursor.subtree_end(pos);
    while cursor.line_at(p) == line {
        match cursor.node(p) {
            Some(name) if matches!(name.kind, NodeKind::Identifier | NodeKind::FieldIdentifier) => {
                let idx = state.next_idx();
                state.emit(Record::Variable(VariableRecord {
                    idx,
                    name: source.text(name).to_string(),
                    ty,
                    qualifiers: Vec::new(),
                }));
                cursor.seek(p + 1);
                return true;
            }
            Some(stop)
                if matches!(
                    stop.kind,
                    NodeKind::Semicolon | NodeKind::Equals | NodeKind::LBrace
                ) =>
            {
                break
            }
            _ => p += 1,
        }
    }
    false
}

/// One variable record per declarator of the declaration at `decl`; the
/// cursor moves past the whole declaration.
pub fn declaration_variables(
    cursor: &mut Cursor<'_>,
    source: SourceText<'_>,
    state: &mut ScanState,
    decl: usize,
    ty: String,
) -> bool {
    let mut shared = Vec::new();
    let mut found = false;

    for child in cursor.children_of(decl) {
        let Some(node) = cursor.node(child) else { continue };
        match node.kind {
            NodeKind::TypeQualifier | NodeKind::StorageClassSpecifier => {
                shared.push(source.text(node).to_string())
            }
            NodeKind::Identifier
            | NodeKind::FieldIdentifier
            | NodeKind::InitDeclarator
            | NodeKind::PointerDeclarator
            | NodeKind::ReferenceDeclarator
            | NodeKind::ArrayDeclarator => {
                let Some((name, own)) = declarator(cursor, source, child) else {
                    continue;
                };
                let mut qualifiers = shared.clone();
                qualifiers.extend(own);
                let idx = state.next_idx();
                state.emit(Record::Variable(VariableRecord {
                    idx,
                    name,
                    ty: ty.clone(),
                    qualifiers,
                }));
                found = true;
            }
            _ => {}
        }
    }

    cursor.seek(cursor.subtree_end(decl));
    found
}

/// Name and pointer/array qualifiers of one declarator, initializer excluded.
fn declarator(cursor: &Cursor<'_>, source: SourceText<'_>, pos: usize) -> Option<(String, Vec<String>)> {
    let mut name = None;
    let mut qualifiers = Vec::new();
    let end = cursor.subtree_end(pos);
    for p in pos..end {
        let node = cursor.node(p)?;
        match node.kind {
            NodeKind::Equals => break,
            NodeKind::Identifier | NodeKind::FieldIdentifier if name.is_none() => {
                name = Some(source.text(node).to_string())
            }
            kind if kind.is_pointer_or_reference() => qualifiers.push(source.text(node).to_string()),
            NodeKind::LBracket => qualifiers.push("[]".to_string()),
            _ => {}
        }
    }
    name.map(|name| (name, qualifiers))
}

#[cfg(test)]
mod tests {
    use super::clean_comment;

    #[test]
    fn comment_markers_are_stripped() {
        assert_eq!(clean_comment("// hello"), "hello");
        assert_eq!(clean_comment("/* block */"), "block");
        assert_eq!(clean_comment("/*\ta\n\tb */"), "a\n b");
    }
}
