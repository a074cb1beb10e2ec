use super::cursor::{Cursor, SourceText};
use super::kinds::NodeKind;

/// What the node under the cursor begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// `#ifdef`, `#ifndef`, `#if`, `#elif`, `#else` or `#endif`
    Directive,
    /// Any other directive line (`#pragma`, `#undef`, ...)
    PreprocCall,
    Include,
    Define,
    MacroDefine,
    /// `extern` immediately followed by a string literal
    ExternC,
    Friend,
    Function,
    Variable,
    Comment,
    Typedef,
    Class,
    Enum,
    Access,
    /// Subtree carries nothing worth extracting; jump over it
    Skip,
    /// Structural node; step into it
    Noise,
    Unhandled,
}

/// Outcome of the line-bounded lookahead after a leading type token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallShape {
    Function,
    Variable,
    Neither,
}

const ACCESS_LABELS: [&str; 3] = ["public", "private", "protected"];

pub fn classify(cursor: &Cursor<'_>, source: SourceText<'_>) -> Construct {
    let pos = cursor.pos();
    let Some(node) = cursor.current() else {
        return Construct::Noise;
    };
    if node.missing {
        return Construct::Noise;
    }

    match node.kind {
        NodeKind::HashIfdef
        | NodeKind::HashIfndef
        | NodeKind::HashIf
        | NodeKind::HashElif
        | NodeKind::HashElifdef
        | NodeKind::HashElifndef
        | NodeKind::HashElse
        | NodeKind::HashEndif => return Construct::Directive,
        NodeKind::PreprocCall => return Construct::PreprocCall,
        NodeKind::PreprocInclude => return Construct::Include,
        NodeKind::PreprocDef => return Construct::Define,
        NodeKind::PreprocFunctionDef => return Construct::MacroDefine,
        NodeKind::KwExtern if cursor.kind_at(pos + 1) == Some(NodeKind::StringLiteral) => {
            return Construct::ExternC
        }
        NodeKind::KwFriend => return Construct::Friend,
        _ => {}
    }

    if is_function(cursor, pos) {
        return Construct::Function;
    }

    match node.kind {
        NodeKind::Comment => Construct::Comment,
        NodeKind::TypeDefinition => Construct::Typedef,
        kind if kind.is_record_specifier() => Construct::Class,
        NodeKind::EnumSpecifier => Construct::Enum,
        NodeKind::AccessSpecifier => Construct::Access,
        NodeKind::StatementIdentifier if ACCESS_LABELS.contains(&source.text(node)) => {
            Construct::Access
        }
        NodeKind::TemplateParameterList
        | NodeKind::UsingDeclaration
        | NodeKind::AliasDeclaration
        | NodeKind::StaticAssertDeclaration => Construct::Skip,
        _ if is_leading_type(cursor, pos) => match call_shape(cursor, pos) {
            CallShape::Variable => Construct::Variable,
            _ => Construct::Noise,
        },
        NodeKind::Unhandled if node.named => Construct::Unhandled,
        _ => Construct::Noise,
    }
}

/// Function rules: a declarator or definition node, a declaration holding a
/// parameter list or cast, or a leading type token with a call shape.
pub fn is_function(cursor: &Cursor<'_>, pos: usize) -> bool {
    let Some(kind) = cursor.kind_at(pos) else {
        return false;
    };
    match kind {
        NodeKind::FunctionDeclarator | NodeKind::FunctionDefinition => true,
        kind if kind.is_declaration() => cursor
            .find_in_subtree(pos, |k| {
                matches!(k, NodeKind::ParameterList | NodeKind::CastExpression)
            })
            .is_some(),
        _ => is_leading_type(cursor, pos) && call_shape(cursor, pos) == CallShape::Function,
    }
}

/// A type token that starts a declaration rather than sitting inside a
/// larger type name.
pub fn is_leading_type(cursor: &Cursor<'_>, pos: usize) -> bool {
    let Some(kind) = cursor.kind_at(pos) else {
        return false;
    };
    let parent = cursor.parent_of(pos).and_then(|p| cursor.kind_at(p));
    if kind.is_simple_type() {
        !matches!(
            parent,
            Some(
                NodeKind::QualifiedIdentifier
                    | NodeKind::TemplateType
                    | NodeKind::TemplateArgumentList
                    | NodeKind::TypeDescriptor
                    | NodeKind::SizedTypeSpecifier
            )
        )
    } else if kind.is_compound_type() {
        parent.is_some_and(NodeKind::is_declaration)
    } else {
        false
    }
}

/// Looks past a leading type token, on its source line only, for the shape
/// of a prototype (`Type name(args)`) or of a plain variable.
pub fn call_shape(cursor: &Cursor<'_>, pos: usize) -> CallShape {
    let Some(line) = cursor.line_at(pos) else {
        return CallShape::Neither;
    };
    let mut p = cursor.subtree_end(pos);
    if matches!(
        cursor.kind_at(p),
        Some(NodeKind::LabeledStatement | NodeKind::StatementIdentifier | NodeKind::Error)
    ) {
        return CallShape::Neither;
    }

    let mut named = false;
    while cursor.line_at(p) == Some(line) {
        match cursor.kind_at(p) {
            Some(NodeKind::CallExpression) => return CallShape::Function,
            Some(NodeKind::Identifier | NodeKind::FieldIdentifier) => named = true,
            Some(kind) if kind.is_parameter_like() && named => return CallShape::Function,
            Some(NodeKind::Semicolon | NodeKind::Equals | NodeKind::LBrace) => break,
            _ => {}
        }
        p += 1;
    }

    if named {
        CallShape::Variable
    } else {
        CallShape::Neither
    }
}
