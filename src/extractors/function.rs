use once_cell::sync::Lazy;
use regex::Regex;

use super::params;
use crate::core::cursor::{Cursor, SourceText};
use crate::core::kinds::NodeKind;
use crate::core::records::FunctionRecord;
use crate::core::state::ScanState;
use crate::error::{Result, ScanError};

static OPERATOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"operator\s*([*=+\-,<>|&/%^!~()\[\]]{1,3})").expect("valid operator regex")
});

/// Extracts a function declaration or definition starting at the cursor.
///
/// Returns `Ok(None)` when no name or no parameter list could be found; the
/// cursor is left untouched so the caller can step into the construct.
pub fn extract(
    cursor: &mut Cursor<'_>,
    source: SourceText<'_>,
    state: &mut ScanState,
) -> Result<Option<FunctionRecord>> {
    let Some((start, end)) = extraction_range(cursor) else {
        return Ok(None);
    };

    let mut record = FunctionRecord::default();
    // Identifier, init-declarator and call stops only apply to call-shaped
    // declarations, which have no function declarator
    let has_declarator =
        (start..end).any(|p| cursor.kind_at(p) == Some(NodeKind::FunctionDeclarator));
    let mut p = start;

    // Return phase
    while p < end {
        let Some(node) = cursor.node(p) else { break };
        match node.kind {
            // export macros and other recovery debris
            NodeKind::Error => {
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::FunctionDeclarator
            | NodeKind::FieldIdentifier
            | NodeKind::CastExpression
            | NodeKind::OperatorCast => break,
            NodeKind::InitDeclarator | NodeKind::CallExpression | NodeKind::Identifier
                if !has_declarator =>
            {
                break
            }
            kind if kind.is_simple_type() && record.return_type.is_none() => {
                record.return_type = Some(source.text(node).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            kind if (kind.is_compound_type()
                || kind.is_record_specifier()
                || kind == NodeKind::EnumSpecifier)
                && record.return_type.is_none() =>
            {
                record.return_type = Some(source.text(node).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::ExplicitFunctionSpecifier => {
                match cursor.node(p + 1) {
                    Some(next) if next.kind == NodeKind::KwExplicit => {}
                    Some(next) => {
                        return Err(ScanError::unexpected(
                            next.start_line + 1,
                            "`explicit`",
                            source.text(next),
                        ))
                    }
                    None => {
                        return Err(ScanError::unexpected(node.start_line + 1, "`explicit`", ""))
                    }
                }
                record.qualifiers.push("explicit".to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::KwInline
            | NodeKind::KwStatic
            | NodeKind::KwVirtual
            | NodeKind::KwConstexpr
            | NodeKind::KwExtern => {
                // `virtual` is a named node wrapping a token of the same kind
                record.qualifiers.push(source.text(node).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::TypeQualifier => {
                record.return_qualifiers.push(source.text(node).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            kind if kind.is_pointer_or_reference() => {
                record.return_qualifiers.push(source.text(node).to_string())
            }
            _ => {}
        }
        p += 1;
    }

    // Name phase
    let mut name = None;
    let mut list = None;
    while p < end {
        let Some(node) = cursor.node(p) else { break };
        match node.kind {
            NodeKind::Error => {
                p = cursor.subtree_end(p);
                continue;
            }
            kind if kind.is_parameter_like() => {
                list = Some(p);
                break;
            }
            NodeKind::Identifier | NodeKind::FieldIdentifier if name.is_none() => {
                name = Some(source.text(node).to_string());
            }
            NodeKind::DestructorName
            | NodeKind::QualifiedIdentifier
            | NodeKind::TemplateFunction
                if name.is_none() =>
            {
                name = Some(source.text(node).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::OperatorName if name.is_none() => {
                name = Some(operator_name(source.text(node)));
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::OperatorCast if name.is_none() => {
                let text = source.text(node);
                let head = text.split('(').next().unwrap_or(text);
                name = Some(head.trim().to_string());
            }
            _ => {}
        }
        p += 1;
    }

    let (Some(name), Some(list)) = (name, list) else {
        return Ok(None);
    };
    record.name = name;
    record.params = params::extract(cursor, source, state, list);

    // Trailing qualifiers
    let mut p = cursor.subtree_end(list);
    while p < end {
        let Some(node) = cursor.node(p) else { break };
        match node.kind {
            NodeKind::CompoundStatement
            | NodeKind::CompoundLiteralExpression
            | NodeKind::FieldInitializerList
            | NodeKind::ParameterList => {
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::TrailingReturnType => {
                if record.return_type.is_none() {
                    let text = source.text(node).trim_start_matches("->").trim();
                    record.return_type = Some(text.to_string());
                }
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::TypeQualifier | NodeKind::VirtualSpecifier | NodeKind::Noexcept => {
                record.qualifiers.push(source.text(node).to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::DefaultMethodClause | NodeKind::DeleteMethodClause => {
                let clause = if node.kind == NodeKind::DefaultMethodClause {
                    "default"
                } else {
                    "delete"
                };
                record.qualifiers.push(clause.to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::PureVirtualClause => {
                record.qualifiers.push("pure".to_string());
                p = cursor.subtree_end(p);
                continue;
            }
            NodeKind::Equals => {
                if let Some(next) = cursor.node(p + 1) {
                    if next.kind == NodeKind::NumberLiteral && source.text(next) == "0" {
                        record.qualifiers.push("pure".to_string());
                    }
                }
            }
            _ => {}
        }
        p += 1;
    }

    if state.take_friend() {
        record.qualifiers.insert(0, "friend".to_string());
    }

    record.body = (start..end)
        .find(|&p| {
            matches!(
                cursor.kind_at(p),
                Some(NodeKind::CompoundStatement | NodeKind::CompoundLiteralExpression)
            )
        })
        .and_then(|p| cursor.node(p))
        .map(|node| source.text(node).to_string());

    record.idx = state.next_idx();
    record.class_path = state.class_path();
    record.access = state.access().map(str::to_string);

    log::trace!("function `{}` with {} params", record.name, record.params.len());
    cursor.seek(end);
    Ok(Some(record))
}

/// Positions `[start, end)` the extraction may consume.
///
/// Containers bound it by their subtree. A leading type token defers to its
/// enclosing declaration, or otherwise runs to the end of the first
/// parameter-like node on its source line.
fn extraction_range(cursor: &Cursor<'_>) -> Option<(usize, usize)> {
    let pos = cursor.pos();
    let kind = cursor.kind_at(pos)?;
    match kind {
        NodeKind::FunctionDefinition | NodeKind::FunctionDeclarator => {
            Some((pos + 1, cursor.subtree_end(pos)))
        }
        kind if kind.is_declaration() => Some((pos + 1, cursor.subtree_end(pos))),
        _ => {
            if let Some(parent) = cursor.parent_of(pos) {
                if cursor.kind_at(parent).is_some_and(NodeKind::is_declaration) {
                    return Some((parent + 1, cursor.subtree_end(parent)));
                }
            }
            let line = cursor.line_at(pos)?;
            let mut p = cursor.subtree_end(pos);
            while cursor.line_at(p) == Some(line) {
                if cursor.kind_at(p).is_some_and(NodeKind::is_parameter_like) {
                    return Some((pos, cursor.subtree_end(p)));
                }
                p += 1;
            }
            None
        }
    }
}

/// `operator+=` becomes `` `+=` ``. Names outside the symbol alphabet are
/// kept as written.
pub fn operator_name(text: &str) -> String {
    match OPERATOR_RE.captures(text).and_then(|caps| caps.get(1)) {
        Some(symbol) => format!("`{}`", symbol.as_str()),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::operator_name;

    #[test]
    fn operator_symbols_are_backquoted() {
        assert_eq!(operator_name("operator+="), "`+=`");
        assert_eq!(operator_name("operator =="), "`==`");
        assert_eq!(operator_name("operator[]"), "`[]`");
        assert_eq!(operator_name("operator()"), "`()`");
    }

    #[test]
    fn other_operators_keep_their_text() {
        assert_eq!(operator_name("operator new"), "operator new");
    }
}
