use crate::core::cursor::{Cursor, SourceText};
use crate::core::kinds::NodeKind;
use crate::core::records::TypedefRecord;
use crate::core::state::ScanState;
use crate::error::{Result, ScanError};

/// Extracts a `typedef` and moves past it.
pub fn extract(
    cursor: &mut Cursor<'_>,
    source: SourceText<'_>,
    state: &mut ScanState,
) -> Result<TypedefRecord> {
    let pos = cursor.pos();
    let end = cursor.subtree_end(pos);

    match cursor.node(pos + 1) {
        Some(first) if first.kind == NodeKind::KwTypedef => {}
        Some(first) => {
            return Err(ScanError::unexpected(
                first.start_line + 1,
                "`typedef`",
                source.text(first),
            ))
        }
        None => {
            let line = cursor.line_at(pos).unwrap_or_default();
            return Err(ScanError::unexpected(line + 1, "`typedef`", ""));
        }
    }

    let mut record = TypedefRecord {
        idx: state.next_idx(),
        ..TypedefRecord::default()
    };

    let mut p = pos + 2;
    while p < end {
        let Some(node) = cursor.node(p) else { break };
        match node.kind {
            NodeKind::TypeQualifier => {
                record.qualifiers.push(source.text(node).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            kind if (kind.is_simple_type() || kind.is_compound_type())
                && record.underlying.is_none() =>
            {
                record.underlying = Some(source.text(node).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            kind if (kind.is_record_specifier() || kind == NodeKind::EnumSpecifier)
                && record.underlying.is_none() =>
            {
                record.underlying = Some(specifier_head(cursor, source, p));
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::FunctionDeclarator => {
                record.signature = Some(source.text(node).to_string());
                record.name = cursor
                    .find_in_subtree(p, |k| k == NodeKind::TypeIdentifier)
                    .and_then(|alias| cursor.node(alias))
                    .map(|alias| source.text(alias).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::Star => record.qualifiers.push("*".to_string()),
            NodeKind::TypeIdentifier if record.underlying.is_some() && record.name.is_none() => {
                record.name = Some(source.text(node).to_string());
            }
            _ => {}
        }
        p += 1;
    }

    cursor.seek(end);
    Ok(record)
}

/// `struct Foo { ... }` reads as `struct Foo`; an anonymous one as `struct`.
fn specifier_head(cursor: &Cursor<'_>, source: SourceText<'_>, pos: usize) -> String {
    let mut head = Vec::new();
    for child in cursor.children_of(pos) {
        let Some(node) = cursor.node(child) else { continue };
        match node.kind {
            NodeKind::KwStruct
            | NodeKind::KwClass
            | NodeKind::KwUnion
            | NodeKind::KwEnum
            | NodeKind::TypeIdentifier
            | NodeKind::QualifiedIdentifier => head.push(source.text(node)),
            _ => break,
        }
    }
    head.join(" ")
}
