use crate::core::cursor::{Cursor, SourceText};
use crate::core::kinds::NodeKind;
use crate::core::records::ParamRecord;
use crate::core::state::ScanState;
use crate::error::DiagnosticKind;

/// Extracts the parameters of the parameter-like node at `list`.
///
/// A real parameter list is walked token by token. Argument lists,
/// parenthesized expressions and casts show up when a prototype parsed as
/// an expression; each of their operands becomes one parameter.
pub fn extract(
    cursor: &Cursor<'_>,
    source: SourceText<'_>,
    state: &mut ScanState,
    list: usize,
) -> Vec<ParamRecord> {
    match cursor.kind_at(list) {
        Some(NodeKind::ParameterList) => parameter_list(cursor, source, state, list),
        Some(_) => operands(cursor, source, list),
        None => Vec::new(),
    }
}

fn parameter_list(
    cursor: &Cursor<'_>,
    source: SourceText<'_>,
    state: &mut ScanState,
    list: usize,
) -> Vec<ParamRecord> {
    let Some(depth) = cursor.depth_at(list) else {
        return Vec::new();
    };
    let end = cursor.subtree_end(list);
    let mut params = Vec::new();
    let mut pending: Option<PendingParam> = None;

    let mut p = list + 1;
    while p < end {
        let Some(node) = cursor.node(p) else { break };

        if node.depth == depth + 1 {
            match node.kind {
                kind if kind.is_parameter_declaration() => {
                    params.extend(pending.take().map(PendingParam::finish));
                    pending = Some(PendingParam::default());
                }
                NodeKind::Ellipsis | NodeKind::VariadicParameter => {
                    params.extend(pending.take().map(PendingParam::finish));
                    let mut variadic = PendingParam::default();
                    variadic.param.name = "...".to_string();
                    pending = Some(variadic);
                }
                NodeKind::Comma => params.extend(pending.take().map(PendingParam::finish)),
                NodeKind::RParen => {
                    params.extend(pending.take().map(PendingParam::finish));
                    break;
                }
                _ => {}
            }
            p += 1;
            continue;
        }

        let Some(param) = pending.as_mut() else {
            p += 1;
            continue;
        };

        if param.awaiting_default {
            param.awaiting_default = false;
            match node.kind {
                NodeKind::StringLiteral | NodeKind::NumberLiteral => {
                    param.param.default = Some(source.text(node).to_string());
                }
                _ => state.diagnose(
                    node.start_line,
                    DiagnosticKind::UnsupportedDefault {
                        kind: node.kind_name.clone(),
                    },
                ),
            }
            param.past_default = true;
            p = cursor.subtree_end(p);
            continue;
        }
        if param.past_default {
            p += 1;
            continue;
        }

        match node.kind {
            kind if kind.is_simple_type() && param.param.ty.is_none() => {
                param.param.ty = Some(source.text(node).to_string());
                param.param.is_primitive =
                    matches!(kind, NodeKind::PrimitiveType | NodeKind::SizedTypeSpecifier);
                p = cursor.subtree_end(p);
                continue;
            }
            kind if (kind.is_compound_type()
                || kind.is_record_specifier()
                || kind == NodeKind::EnumSpecifier)
                && param.param.ty.is_none() =>
            {
                param.param.ty = Some(source.text(node).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::TypeQualifier => {
                param.param.qualifiers.push(source.text(node).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::FunctionDeclarator => {
                // function pointer: keep the declarator, not its inner parameters
                param.param.signature = Some(source.text(node).to_string());
                let declarator = cursor.children_of(p).first().copied();
                if !param.named {
                    if let Some(name) = declarator
                        .and_then(|d| {
                            (d..cursor.subtree_end(d))
                                .find(|&q| cursor.kind_at(q) == Some(NodeKind::Identifier))
                        })
                        .and_then(|id| cursor.node(id))
                    {
                        param.param.name = source.text(name).to_string();
                        param.named = true;
                    }
                }
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::KwConst => param.param.qualifiers.push("const".to_string()),
            kind if kind.is_pointer_or_reference() => {
                param.param.qualifiers.push(source.text(node).to_string())
            }
            NodeKind::LBracket => param.param.qualifiers.push("[]".to_string()),
            NodeKind::Identifier | NodeKind::FieldIdentifier if !param.named => {
                param.param.name = source.text(node).to_string();
                param.named = true;
            }
            NodeKind::Equals => param.awaiting_default = true,
            _ => {}
        }
        p += 1;
    }

    params.extend(pending.take().map(PendingParam::finish));
    params
}

#[derive(Default)]
struct PendingParam {
    param: ParamRecord,
    named: bool,
    awaiting_default: bool,
    past_default: bool,
}

impl PendingParam {
    fn finish(self) -> ParamRecord {
        self.param
    }
}

/// One parameter per operand of an argument list, parenthesized
/// expression or cast.
fn operands(cursor: &Cursor<'_>, source: SourceText<'_>, list: usize) -> Vec<ParamRecord> {
    let mut params = Vec::new();
    for child in cursor.children_of(list) {
        let Some(node) = cursor.node(child) else { continue };
        let mut param = ParamRecord::default();
        match node.kind {
            NodeKind::LParen | NodeKind::Comma => continue,
            NodeKind::RParen => break,
            NodeKind::Identifier | NodeKind::TypeIdentifier | NodeKind::TypeDescriptor => {
                param.ty = Some(source.text(node).to_string());
            }
            NodeKind::PrimitiveType | NodeKind::SizedTypeSpecifier => {
                param.ty = Some(source.text(node).to_string());
                param.is_primitive = true;
            }
            NodeKind::BinaryExpression => {
                // `Foo * x` and `Foo & x` read as multiplications and bitwise ands
                let parts = cursor.children_of(child);
                let operator = parts.get(1).and_then(|&p| cursor.node(p));
                match (parts.first(), operator, parts.get(2)) {
                    (Some(&left), Some(op), Some(&right)) if op.kind.is_pointer_or_reference() => {
                        param.ty = cursor.node(left).map(|n| source.text(n).to_string());
                        param.qualifiers.push(source.text(op).to_string());
                        if let Some(right) = cursor.node(right) {
                            param.name = source.text(right).to_string();
                        }
                    }
                    _ => param.ty = Some(source.text(node).to_string()),
                }
            }
            _ => param.ty = Some(source.text(node).to_string()),
        }
        params.push(param);
    }
    params
}
