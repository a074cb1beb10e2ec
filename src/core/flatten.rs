use std::ops::Range;

use super::kinds::NodeKind;

/// The parts of a concrete syntax tree node the scanner relies on.
pub trait SyntaxNode: Sized {
    fn kind(&self) -> &str;
    fn byte_range(&self) -> Range<usize>;
    /// 0-based row of the first byte
    fn start_line(&self) -> usize;
    /// Whether the grammar names this node (punctuation and keywords are anonymous)
    fn is_named(&self) -> bool;
    /// Zero-width node inserted by error recovery
    fn is_missing(&self) -> bool;
    fn children(&self) -> Vec<Self>;
}

impl<'tree> SyntaxNode for tree_sitter::Node<'tree> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn byte_range(&self) -> Range<usize> {
        tree_sitter::Node::byte_range(self)
    }

    fn start_line(&self) -> usize {
        self.start_position().row
    }

    fn is_named(&self) -> bool {
        tree_sitter::Node::is_named(self)
    }

    fn is_missing(&self) -> bool {
        tree_sitter::Node::is_missing(self)
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        tree_sitter::Node::children(self, &mut cursor).collect()
    }
}

/// One syntax-tree node in the flattened sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatNode {
    /// Nesting level relative to the root (the root itself is 0)
    pub depth: usize,
    pub kind: NodeKind,
    /// Grammar name of the node, kept for diagnostics
    pub kind_name: String,
    pub start_byte: usize,
    pub end_byte: usize,
    /// 0-based source row
    pub start_line: usize,
    pub named: bool,
    /// Inserted by the parser, absent from the source
    pub missing: bool,
}

/// Linearizes a tree in pre-order: parents before children, children in
/// source order. Punctuation nodes are kept.
pub fn flatten<N: SyntaxNode>(root: N) -> Vec<FlatNode> {
    let mut nodes = Vec::new();
    let mut stack = vec![(0usize, root)];

    while let Some((depth, node)) = stack.pop() {
        let range = node.byte_range();
        let kind_name = node.kind().to_string();
        nodes.push(FlatNode {
            depth,
            kind: NodeKind::from_raw(&kind_name),
            kind_name,
            start_byte: range.start,
            end_byte: range.end,
            start_line: node.start_line(),
            named: node.is_named(),
            missing: node.is_missing(),
        });

        for child in node.children().into_iter().rev() {
            stack.push((depth + 1, child));
        }
    }

    nodes
}
