use hdrdecl::core::flatten::{flatten, SyntaxNode};
use hdrdecl::core::kinds::NodeKind;
use hdrdecl::parsers::HeaderParser;
use std::ops::Range;

#[derive(Clone)]
struct TestNode {
    kind: &'static str,
    line: usize,
    children: Vec<TestNode>,
}

fn leaf(kind: &'static str, line: usize) -> TestNode {
    TestNode {
        kind,
        line,
        children: Vec::new(),
    }
}

fn branch(kind: &'static str, line: usize, children: Vec<TestNode>) -> TestNode {
    TestNode {
        kind,
        line,
        children,
    }
}

impl SyntaxNode for TestNode {
    fn kind(&self) -> &str {
        self.kind
    }

    fn byte_range(&self) -> Range<usize> {
        0..0
    }

    fn start_line(&self) -> usize {
        self.line
    }

    fn is_named(&self) -> bool {
        self.kind.chars().all(|c| c.is_ascii_lowercase() || c == '_')
    }

    fn is_missing(&self) -> bool {
        false
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }
}

#[test]
fn flatten_is_preorder_with_depths() {
    let tree = branch(
        "translation_unit",
        0,
        vec![
            branch(
                "declaration",
                0,
                vec![
                    leaf("primitive_type", 0),
                    branch(
                        "function_declarator",
                        0,
                        vec![
                            leaf("identifier", 0),
                            branch("parameter_list", 0, vec![leaf("(", 0), leaf(")", 0)]),
                        ],
                    ),
                    leaf(";", 0),
                ],
            ),
            leaf("comment", 1),
        ],
    );

    let flat = flatten(tree);
    let shape: Vec<(usize, &str)> = flat.iter().map(|n| (n.depth, n.kind_name.as_str())).collect();
    assert_eq!(
        shape,
        vec![
            (0, "translation_unit"),
            (1, "declaration"),
            (2, "primitive_type"),
            (2, "function_declarator"),
            (3, "identifier"),
            (3, "parameter_list"),
            (4, "("),
            (4, ")"),
            (2, ";"),
            (1, "comment"),
        ]
    );
    assert_eq!(flat[6].kind, NodeKind::LParen);
    assert!(!flat[6].named);
    assert_eq!(flat[9].start_line, 1);
}

#[test]
fn flatten_keeps_every_parsed_node() {
    let source = "int add(int a, int b);\n";
    let mut parser = HeaderParser::new().unwrap();
    let tree = parser.parse(source).unwrap();

    fn count(node: tree_sitter::Node) -> usize {
        let mut cursor = node.walk();
        1 + node.children(&mut cursor).map(count).sum::<usize>()
    }

    let flat = flatten(tree.root_node());
    assert_eq!(flat.len(), count(tree.root_node()));
    assert_eq!(flat[0].depth, 0);
    assert_eq!(flat[0].kind, NodeKind::TranslationUnit);

    // punctuation survives as explicit delimiters
    let commas = flat.iter().filter(|n| n.kind == NodeKind::Comma).count();
    assert_eq!(commas, 1);
    assert!(flat.iter().any(|n| n.kind == NodeKind::RParen));
    assert!(flat.iter().any(|n| n.kind == NodeKind::Semicolon));
}
