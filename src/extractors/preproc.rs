//! Preprocessor lines: conditional blocks, includes, defines and the rest.

use crate::core::cursor::{Cursor, SourceText};
use crate::core::kinds::NodeKind;
use crate::core::records::{
    ConditionalKind, ConditionalRecord, DefineRecord, DirectiveRecord, ExternRecord,
    IncludeRecord, MacroDefineRecord, Record,
};
use crate::core::state::ScanState;
use crate::error::{Result, ScanError};

/// Marker text of an `extern "C" {` block opening.
pub const EXTERN_C_OPEN: &str = "\"C\"{";

/// Handles a conditional directive token (`#ifdef` ... `#endif`).
pub fn conditional(
    cursor: &mut Cursor<'_>,
    source: SourceText<'_>,
    state: &mut ScanState,
) -> Result<()> {
    let pos = cursor.pos();
    let Some(node) = cursor.current() else {
        return Ok(());
    };
    let line = node.start_line + 1;

    match node.kind {
        NodeKind::HashIfdef | NodeKind::HashIfndef => {
            let kind = if node.kind == NodeKind::HashIfdef {
                ConditionalKind::IfDef
            } else {
                ConditionalKind::IfNDef
            };
            let name = tested_identifier(cursor, source, pos)?;
            open(state, kind, Some(name.clone()), vec![name], line);
            cursor.seek(pos + 2);
        }
        NodeKind::HashIf => {
            let (raw, tested) = condition(cursor, source, pos)?;
            open(state, ConditionalKind::If, Some(raw), tested, line);
            cursor.seek(cursor.subtree_end(pos + 1));
        }
        NodeKind::HashElif => {
            state.close_conditional(line, "#elif")?;
            let (raw, tested) = condition(cursor, source, pos)?;
            open(state, ConditionalKind::Elif, Some(raw), tested, line);
            cursor.seek(cursor.subtree_end(pos + 1));
        }
        NodeKind::HashElifdef | NodeKind::HashElifndef => {
            state.close_conditional(line, source.text(node))?;
            let name = tested_identifier(cursor, source, pos)?;
            open(state, ConditionalKind::Elif, Some(name.clone()), vec![name], line);
            cursor.seek(pos + 2);
        }
        NodeKind::HashElse => {
            state.close_conditional(line, "#else")?;
            open(state, ConditionalKind::Else, None, Vec::new(), line);
            cursor.advance();
        }
        NodeKind::HashEndif => {
            state.close_conditional(line, "#endif")?;
            cursor.advance();
        }
        _ => cursor.advance(),
    }
    Ok(())
}

fn open(
    state: &mut ScanState,
    conditional_kind: ConditionalKind,
    condition: Option<String>,
    tested: Vec<String>,
    line: usize,
) {
    let record = ConditionalRecord {
        idx: state.next_idx(),
        conditional_kind,
        condition,
        tested,
        records: Vec::new(),
    };
    log::trace!("line {}: open {:?} block", line, conditional_kind);
    state.open_conditional(record, line);
}

/// The identifier right after `#ifdef`/`#ifndef`.
fn tested_identifier(cursor: &Cursor<'_>, source: SourceText<'_>, pos: usize) -> Result<String> {
    match cursor.node(pos + 1) {
        Some(next) if next.kind == NodeKind::Identifier => Ok(source.text(next).to_string()),
        Some(next) => Err(ScanError::unexpected(
            next.start_line + 1,
            "identifier",
            source.text(next),
        )),
        None => Err(ScanError::unexpected(
            cursor.line_at(pos).unwrap_or_default() + 1,
            "identifier",
            "",
        )),
    }
}

/// Raw text of an `#if`/`#elif` condition plus the identifiers it tests
/// through `defined`. The expression is never evaluated.
fn condition(
    cursor: &Cursor<'_>,
    source: SourceText<'_>,
    pos: usize,
) -> Result<(String, Vec<String>)> {
    let expr = pos + 1;
    let Some(node) = cursor.node(expr).filter(|n| n.kind != NodeKind::Newline) else {
        return Err(ScanError::unexpected(
            cursor.line_at(pos).unwrap_or_default() + 1,
            "condition",
            "",
        ));
    };

    let mut tested = Vec::new();
    let mut inside_defined = None;
    for p in expr..cursor.subtree_end(expr) {
        let Some(n) = cursor.node(p) else { break };
        if inside_defined.is_some_and(|end| p >= end) {
            inside_defined = None;
        }
        match n.kind {
            NodeKind::PreprocDefined => inside_defined = Some(cursor.subtree_end(p)),
            NodeKind::Identifier if inside_defined.is_some() => {
                tested.push(source.text(n).to_string())
            }
            _ => {}
        }
    }
    Ok((source.text(node).to_string(), tested))
}

pub fn include(
    cursor: &mut Cursor<'_>,
    source: SourceText<'_>,
    state: &mut ScanState,
) -> Result<IncludeRecord> {
    let pos = cursor.pos();
    let line = cursor.line_at(pos).unwrap_or_default() + 1;
    expect_kind(cursor, source, pos + 1, NodeKind::HashInclude, "`#include`", line)?;

    let record = match cursor.node(pos + 2) {
        Some(path)
            if matches!(
                path.kind,
                NodeKind::StringLiteral | NodeKind::SystemLibString | NodeKind::Identifier
            ) =>
        {
            IncludeRecord {
                idx: state.next_idx(),
                text: source.text(path).to_string(),
                system: path.kind == NodeKind::SystemLibString,
            }
        }
        Some(other) => {
            return Err(ScanError::unexpected(line, "include path", source.text(other)))
        }
        None => return Err(ScanError::unexpected(line, "include path", "")),
    };

    cursor.seek(cursor.subtree_end(pos));
    Ok(record)
}

pub fn define(
    cursor: &mut Cursor<'_>,
    source: SourceText<'_>,
    state: &mut ScanState,
) -> Result<DefineRecord> {
    let pos = cursor.pos();
    let line = cursor.line_at(pos).unwrap_or_default() + 1;
    expect_kind(cursor, source, pos + 1, NodeKind::HashDefine, "`#define`", line)?;
    let name = expect_kind(cursor, source, pos + 2, NodeKind::Identifier, "macro name", line)?;

    let value = cursor
        .child_of_kind(pos, NodeKind::PreprocArg)
        .and_then(|p| cursor.node(p))
        .map(|n| source.text(n).to_string())
        .filter(|v| !v.is_empty());

    let record = DefineRecord {
        idx: state.next_idx(),
        name,
        value,
    };
    cursor.seek(cursor.subtree_end(pos));
    Ok(record)
}

pub fn macro_define(
    cursor: &mut Cursor<'_>,
    source: SourceText<'_>,
    state: &mut ScanState,
) -> Result<MacroDefineRecord> {
    let pos = cursor.pos();
    let line = cursor.line_at(pos).unwrap_or_default() + 1;
    expect_kind(cursor, source, pos + 1, NodeKind::HashDefine, "`#define`", line)?;
    let name = expect_kind(cursor, source, pos + 2, NodeKind::Identifier, "macro name", line)?;

    let params: Vec<String> = cursor
        .child_of_kind(pos, NodeKind::PreprocParams)
        .map(|list| {
            cursor
                .children_of(list)
                .into_iter()
                .filter_map(|p| cursor.node(p))
                .filter(|n| matches!(n.kind, NodeKind::Identifier | NodeKind::Ellipsis))
                .map(|n| source.text(n).to_string())
                .collect()
        })
        .unwrap_or_default();

    let definition = cursor
        .child_of_kind(pos, NodeKind::PreprocArg)
        .and_then(|p| cursor.node(p))
        .map(|n| source.text(n).to_string())
        .filter(|v| !v.is_empty());

    let record = MacroDefineRecord {
        idx: state.next_idx(),
        name,
        params,
        definition,
    };
    cursor.seek(cursor.subtree_end(pos));
    Ok(record)
}

/// A directive line the grammar has no dedicated node for. Conditional
/// directives that ended up here are routed to the conditional tracker.
pub fn directive_call(
    cursor: &mut Cursor<'_>,
    source: SourceText<'_>,
    state: &mut ScanState,
) -> Result<()> {
    let pos = cursor.pos();
    let end = cursor.subtree_end(pos);
    let line = cursor.line_at(pos).unwrap_or_default() + 1;

    let name = cursor
        .child_of_kind(pos, NodeKind::PreprocDirective)
        .and_then(|p| cursor.node(p))
        .map(|n| source.text(n).to_string())
        .ok_or_else(|| ScanError::unexpected(line, "directive", ""))?;
    let argument = cursor
        .child_of_kind(pos, NodeKind::PreprocArg)
        .and_then(|p| cursor.node(p))
        .map(|n| source.text(n).to_string())
        .filter(|a| !a.is_empty());

    let compact: String = name.split_whitespace().collect();
    match compact.as_str() {
        "#endif" => state.close_conditional(line, "#endif")?,
        "#else" => {
            state.close_conditional(line, "#else")?;
            open(state, ConditionalKind::Else, None, Vec::new(), line);
        }
        "#elif" => {
            state.close_conditional(line, "#elif")?;
            let raw = argument.unwrap_or_default();
            open(state, ConditionalKind::Elif, Some(raw), Vec::new(), line);
        }
        _ => {
            let idx = state.next_idx();
            state.emit(Record::Directive(DirectiveRecord {
                idx,
                name: compact,
                argument,
            }));
        }
    }

    cursor.seek(end);
    Ok(())
}

/// `extern` followed by a string literal. Only the `"C"{` block opening
/// produces a record; the declarations inside are scanned normally.
pub fn extern_c(cursor: &mut Cursor<'_>, source: SourceText<'_>, state: &mut ScanState) {
    let pos = cursor.pos();
    let literal = pos + 1;
    let Some(node) = cursor.node(literal) else {
        cursor.advance();
        return;
    };

    let mut text = source.text(node).to_string();
    let after = cursor.subtree_end(literal);
    let mut p = after;
    while let Some(next) = cursor.node(p) {
        match next.kind {
            NodeKind::Quote => {}
            NodeKind::DeclarationList => {}
            NodeKind::LBrace | NodeKind::RBrace => {
                text.push_str(source.text(next));
                break;
            }
            _ => break,
        }
        p += 1;
    }

    if text == EXTERN_C_OPEN {
        let idx = state.next_idx();
        state.emit(Record::Extern(ExternRecord { idx, text }));
    }
    cursor.seek(after);
}

fn expect_kind(
    cursor: &Cursor<'_>,
    source: SourceText<'_>,
    pos: usize,
    kind: NodeKind,
    expected: &'static str,
    line: usize,
) -> Result<String> {
    match cursor.node(pos) {
        Some(node) if node.kind == kind => Ok(source.text(node).to_string()),
        Some(node) => Err(ScanError::unexpected(line, expected, source.text(node))),
        None => Err(ScanError::unexpected(line, expected, "")),
    }
}
