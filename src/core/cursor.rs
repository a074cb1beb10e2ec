use super::flatten::FlatNode;
use super::kinds::NodeKind;

/// Source bytes the flattened spans point into.
#[derive(Debug, Clone, Copy)]
pub struct SourceText<'a> {
    bytes: &'a [u8],
}

impl<'a> SourceText<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Text covered by a node, surrounding whitespace removed.
    pub fn text(&self, node: &FlatNode) -> &'a str {
        self.bytes
            .get(node.start_byte..node.end_byte)
            .and_then(|slice| std::str::from_utf8(slice).ok())
            .unwrap_or("")
            .trim()
    }
}

/// Forward-only position over a flattened tree.
///
/// Every "end of subtree" question the scanner asks goes through
/// [`Cursor::subtree_end`] instead of ad-hoc depth comparisons.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    nodes: &'a [FlatNode],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(nodes: &'a [FlatNode]) -> Self {
        Self { nodes, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.nodes.len()
    }

    pub fn current(&self) -> Option<&'a FlatNode> {
        self.nodes.get(self.pos)
    }

    pub fn peek(&self, offset: usize) -> Option<&'a FlatNode> {
        self.nodes.get(self.pos + offset)
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Moves to `pos`. The cursor never moves backwards.
    pub fn seek(&mut self, pos: usize) {
        debug_assert!(pos >= self.pos, "cursor moved backwards");
        self.pos = pos.max(self.pos);
    }

    pub fn node(&self, pos: usize) -> Option<&'a FlatNode> {
        self.nodes.get(pos)
    }

    pub fn kind_at(&self, pos: usize) -> Option<NodeKind> {
        self.nodes.get(pos).map(|n| n.kind)
    }

    pub fn depth_at(&self, pos: usize) -> Option<usize> {
        self.nodes.get(pos).map(|n| n.depth)
    }

    pub fn line_at(&self, pos: usize) -> Option<usize> {
        self.nodes.get(pos).map(|n| n.start_line)
    }

    /// First position after the subtree rooted at `pos`.
    pub fn subtree_end(&self, pos: usize) -> usize {
        let Some(depth) = self.depth_at(pos) else {
            return self.nodes.len();
        };
        self.nodes[pos + 1..]
            .iter()
            .position(|n| n.depth <= depth)
            .map(|offset| pos + 1 + offset)
            .unwrap_or(self.nodes.len())
    }

    pub fn parent_of(&self, pos: usize) -> Option<usize> {
        let depth = self.depth_at(pos)?;
        if depth == 0 {
            return None;
        }
        self.nodes[..pos].iter().rposition(|n| n.depth == depth - 1)
    }

    /// Positions of the direct children of `pos`, in source order.
    pub fn children_of(&self, pos: usize) -> Vec<usize> {
        let Some(depth) = self.depth_at(pos) else {
            return Vec::new();
        };
        (pos + 1..self.subtree_end(pos))
            .filter(|&p| self.nodes[p].depth == depth + 1)
            .collect()
    }

    pub fn child_of_kind(&self, pos: usize, kind: NodeKind) -> Option<usize> {
        self.children_of(pos)
            .into_iter()
            .find(|&p| self.nodes[p].kind == kind)
    }

    /// First descendant of `pos` (excluding `pos`) matching `pred`.
    pub fn find_in_subtree(&self, pos: usize, pred: impl Fn(NodeKind) -> bool) -> Option<usize> {
        (pos + 1..self.subtree_end(pos)).find(|&p| pred(self.nodes[p].kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(depth: usize, kind: &str, line: usize) -> FlatNode {
        FlatNode {
            depth,
            kind: NodeKind::from_raw(kind),
            kind_name: kind.to_string(),
            start_byte: 0,
            end_byte: 0,
            start_line: line,
            named: !kind.starts_with(|c: char| c.is_ascii_punctuation()),
            missing: false,
        }
    }

    fn sample() -> Vec<FlatNode> {
        vec![
            node(0, "translation_unit", 0),
            node(1, "declaration", 0),
            node(2, "primitive_type", 0),
            node(2, "function_declarator", 0),
            node(3, "identifier", 0),
            node(3, "parameter_list", 0),
            node(4, "(", 0),
            node(4, ")", 0),
            node(2, ";", 0),
            node(1, "comment", 1),
        ]
    }

    #[test]
    fn subtree_end_stops_at_next_sibling_or_ancestor() {
        let nodes = sample();
        let cursor = Cursor::new(&nodes);
        assert_eq!(cursor.subtree_end(3), 8);
        assert_eq!(cursor.subtree_end(1), 9);
        assert_eq!(cursor.subtree_end(9), 10);
        assert_eq!(cursor.subtree_end(0), 10);
    }

    #[test]
    fn parent_and_children_follow_depth() {
        let nodes = sample();
        let cursor = Cursor::new(&nodes);
        assert_eq!(cursor.parent_of(5), Some(3));
        assert_eq!(cursor.parent_of(0), None);
        assert_eq!(cursor.children_of(1), vec![2, 3, 8]);
        assert_eq!(cursor.child_of_kind(3, NodeKind::ParameterList), Some(5));
        assert_eq!(
            cursor.find_in_subtree(1, |k| k == NodeKind::ParameterList),
            Some(5)
        );
    }

    #[test]
    fn seek_never_moves_backwards() {
        let nodes = sample();
        let mut cursor = Cursor::new(&nodes);
        cursor.seek(4);
        cursor.advance();
        assert_eq!(cursor.pos(), 5);
        assert_eq!(cursor.peek(1).map(|n| n.kind), Some(NodeKind::LParen));
        cursor.seek(10);
        assert!(cursor.is_done());
    }
}
