use hdrdecl::core::records::{ConditionalKind, ConditionalRecord, Record};
use hdrdecl::{extract_source, ScanError};

fn conditional(record: &Record) -> &ConditionalRecord {
    match record {
        Record::Conditional(conditional) => conditional,
        other => panic!("expected a conditional, got {other:?}"),
    }
}

#[test]
fn ifdef_wraps_its_function() {
    let output = extract_source("#ifdef FOO\nint add(int a, int b);\n#endif\n").unwrap();
    assert_eq!(output.records.len(), 1);

    let block = conditional(&output.records[0]);
    assert_eq!(block.idx, 0);
    assert_eq!(block.conditional_kind, ConditionalKind::IfDef);
    assert_eq!(block.condition.as_deref(), Some("FOO"));
    assert_eq!(block.tested, vec!["FOO"]);
    assert_eq!(block.records.len(), 1);

    let Record::Function(add) = &block.records[0] else {
        panic!("expected the function inside the block");
    };
    assert_eq!(add.idx, 1);
    assert_eq!(add.name, "add");
    assert_eq!(add.return_type.as_deref(), Some("int"));
    let params: Vec<_> = add
        .params
        .iter()
        .map(|p| (p.name.as_str(), p.ty.as_deref(), p.is_primitive))
        .collect();
    assert_eq!(params, vec![("a", Some("int"), true), ("b", Some("int"), true)]);
}

#[test]
fn include_guard_with_branches() {
    let source = r#"#ifndef GUARD_H
#define GUARD_H
#if defined(USE_A) && VERSION > 2
int a;
#elif defined(USE_B)
int b;
#else
int c;
#endif
#endif
"#;
    let output = extract_source(source).unwrap();
    assert_eq!(output.records.len(), 1);

    let guard = conditional(&output.records[0]);
    assert_eq!(guard.conditional_kind, ConditionalKind::IfNDef);
    assert_eq!(guard.condition.as_deref(), Some("GUARD_H"));
    assert_eq!(guard.idx, 0);
    assert_eq!(guard.records.len(), 4);

    assert!(matches!(&guard.records[0], Record::Define(d) if d.name == "GUARD_H" && d.idx == 1));

    let branches: Vec<_> = guard.records[1..].iter().map(conditional).collect();
    let kinds: Vec<_> = branches.iter().map(|b| b.conditional_kind).collect();
    assert_eq!(
        kinds,
        vec![ConditionalKind::If, ConditionalKind::Elif, ConditionalKind::Else]
    );
    assert_eq!(
        branches[0].condition.as_deref(),
        Some("defined(USE_A) && VERSION > 2")
    );
    assert_eq!(branches[0].tested, vec!["USE_A"]);
    assert_eq!(branches[1].tested, vec!["USE_B"]);
    assert_eq!(branches[2].condition, None);

    let indices: Vec<_> = branches
        .iter()
        .flat_map(|b| [b.idx, b.records[0].idx()])
        .collect();
    assert_eq!(indices, vec![2, 3, 4, 5, 6, 7]);

    for (branch, name) in branches.iter().zip(["a", "b", "c"]) {
        assert!(matches!(&branch.records[..], [Record::Variable(v)] if v.name == name));
    }
}

#[test]
fn nested_conditionals_close_back_to_top_level() {
    let source = "#ifdef A\n#ifdef B\nint x;\n#endif\n#endif\nint y;\n";
    let output = extract_source(source).unwrap();
    assert_eq!(output.records.len(), 2);
    assert!(matches!(&output.records[1], Record::Variable(v) if v.name == "y"));

    let outer = conditional(&output.records[0]);
    let inner = conditional(&outer.records[0]);
    assert_eq!(inner.condition.as_deref(), Some("B"));
    assert_eq!(inner.records.len(), 1);
}

#[test]
fn unterminated_conditional_is_an_error() {
    let err = extract_source("#ifdef FOO\nint x;\n").unwrap_err();
    assert!(matches!(err, ScanError::UnterminatedConditional { line: 1 }), "{err}");
}

#[test]
fn stray_endif_is_an_error() {
    let err = extract_source("int x;\n#endif\n").unwrap_err();
    assert!(
        matches!(err, ScanError::UnbalancedDirective { .. }),
        "{err}"
    );
}
