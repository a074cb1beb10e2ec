use super::misc;
use crate::core::cursor::{Cursor, SourceText};
use crate::core::kinds::NodeKind;
use crate::core::records::{ClassKind, ClassRecord, EnumRecord, Enumerator, Record};
use crate::core::state::ScanState;

/// Handles a class, struct or union specifier.
///
/// A specifier with a body opens a class frame and leaves the cursor inside
/// the member list, so members are scanned like any other record. One with
/// neither body nor base clause is a forward declaration when `;` follows on
/// the same line, and an elaborated type name otherwise.
pub fn class_specifier(cursor: &mut Cursor<'_>, source: SourceText<'_>, state: &mut ScanState) {
    let pos = cursor.pos();
    let end = cursor.subtree_end(pos);
    let class_kind = match cursor.kind_at(pos) {
        Some(NodeKind::StructSpecifier) => ClassKind::Struct,
        Some(NodeKind::UnionSpecifier) => ClassKind::Union,
        _ => ClassKind::Class,
    };

    let children = cursor.children_of(pos);
    let find = |pred: fn(NodeKind) -> bool| {
        children
            .iter()
            .copied()
            .find(|&c| cursor.kind_at(c).is_some_and(pred))
    };
    let name_pos = find(|k| {
        matches!(
            k,
            NodeKind::TypeIdentifier | NodeKind::QualifiedIdentifier | NodeKind::TemplateType
        )
    });
    let base_pos = find(|k| k == NodeKind::BaseClassClause);
    let body_pos = find(|k| k == NodeKind::FieldDeclarationList);

    let name = name_pos
        .and_then(|p| cursor.node(p))
        .map(|n| source.text(n).to_string());

    match (name, body_pos) {
        (Some(name), Some(body)) => {
            let base = base_pos
                .and_then(|p| cursor.node(p))
                .map(|n| source.text(n).trim_start_matches(':').trim().to_string())
                .filter(|b| !b.is_empty());
            let record = ClassRecord {
                idx: state.next_idx(),
                class_kind,
                name,
                base,
                is_forward_declaration: false,
                members: Vec::new(),
            };
            log::debug!("entering {} {}", class_kind.as_str(), record.name);
            state.open_class(record, cursor.subtree_end(body));
            cursor.seek(body + 1);
        }
        (Some(name), None) if base_pos.is_none() && terminated_on_same_line(cursor, pos, end) => {
            let idx = state.next_idx();
            state.emit(Record::Class(ClassRecord {
                idx,
                class_kind,
                name,
                base: None,
                is_forward_declaration: true,
                members: Vec::new(),
            }));
            cursor.seek(end);
        }
        (Some(_), None) => elaborated(cursor, source, state),
        (None, _) => cursor.seek(end),
    }
}

/// `enum` specifiers: a body yields an enum record, a bare name is an
/// elaborated type like `enum Color c;`.
pub fn enum_specifier(cursor: &mut Cursor<'_>, source: SourceText<'_>, state: &mut ScanState) {
    let pos = cursor.pos();
    let end = cursor.subtree_end(pos);

    let Some(list) = cursor.child_of_kind(pos, NodeKind::EnumeratorList) else {
        elaborated(cursor, source, state);
        return;
    };

    let name = cursor
        .children_of(pos)
        .into_iter()
        .take_while(|&c| cursor.kind_at(c) != Some(NodeKind::Colon))
        .find(|&c| {
            matches!(
                cursor.kind_at(c),
                Some(NodeKind::TypeIdentifier | NodeKind::QualifiedIdentifier)
            )
        })
        .and_then(|c| cursor.node(c))
        .map(|n| source.text(n).to_string());

    let mut enumerators = Vec::new();
    for item in cursor.children_of(list) {
        if cursor.kind_at(item) != Some(NodeKind::Enumerator) {
            continue;
        }
        let parts = cursor.children_of(item);
        let Some(enumerator_name) = parts.first().and_then(|&p| cursor.node(p)) else {
            continue;
        };
        let value = parts
            .iter()
            .skip_while(|&&p| cursor.kind_at(p) != Some(NodeKind::Equals))
            .nth(1)
            .and_then(|&p| cursor.node(p))
            .map(|n| source.text(n).to_string());
        enumerators.push(Enumerator {
            name: source.text(enumerator_name).to_string(),
            value,
        });
    }

    let idx = state.next_idx();
    state.emit(Record::Enum(EnumRecord {
        idx,
        name,
        enumerators,
    }));
    cursor.seek(end);
}

/// `public:`, `private:`, `protected:` and label-shaped equivalents.
pub fn access_specifier(cursor: &mut Cursor<'_>, source: SourceText<'_>, state: &mut ScanState) {
    let pos = cursor.pos();
    if let Some(node) = cursor.current() {
        let access = source.text(node).replace(':', "");
        state.set_access(access.trim());
    }
    cursor.seek(cursor.subtree_end(pos));
}

fn terminated_on_same_line(cursor: &Cursor<'_>, pos: usize, end: usize) -> bool {
    cursor.kind_at(end) == Some(NodeKind::Semicolon) && cursor.line_at(end) == cursor.line_at(pos)
}

/// A specifier used as a plain type name inside a declaration.
fn elaborated(cursor: &mut Cursor<'_>, source: SourceText<'_>, state: &mut ScanState) {
    let pos = cursor.pos();
    let ty = cursor
        .current()
        .map(|n| source.text(n).to_string())
        .unwrap_or_default();
    match cursor.parent_of(pos) {
        Some(parent) if cursor.kind_at(parent).is_some_and(NodeKind::is_declaration) => {
            misc::declaration_variables(cursor, source, state, parent, ty);
        }
        _ => cursor.seek(cursor.subtree_end(pos)),
    }
}
