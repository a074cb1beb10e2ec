use hdrdecl::core::records::Record;
use hdrdecl::extract_source;

#[test]
fn typedef_forms() {
    let source = r#"typedef unsigned int uint;
typedef const char* cstr;
typedef void (*Callback)(int code);
typedef struct Node { int value; } Node;
"#;
    let output = extract_source(source).unwrap();
    let typedefs: Vec<_> = output
        .records
        .iter()
        .map(|r| match r {
            Record::Typedef(t) => t,
            other => panic!("expected typedef, got {other:?}"),
        })
        .collect();
    assert_eq!(typedefs.len(), 4);

    assert_eq!(typedefs[0].name.as_deref(), Some("uint"));
    assert_eq!(typedefs[0].underlying.as_deref(), Some("unsigned int"));

    assert_eq!(typedefs[1].name.as_deref(), Some("cstr"));
    assert_eq!(typedefs[1].underlying.as_deref(), Some("char"));
    assert_eq!(typedefs[1].qualifiers, vec!["const", "*"]);

    assert_eq!(typedefs[2].name.as_deref(), Some("Callback"));
    assert_eq!(typedefs[2].underlying.as_deref(), Some("void"));
    assert_eq!(typedefs[2].signature.as_deref(), Some("(*Callback)(int code)"));

    assert_eq!(typedefs[3].name.as_deref(), Some("Node"));
    assert_eq!(typedefs[3].underlying.as_deref(), Some("struct Node"));
}

#[test]
fn enum_values() {
    let output = extract_source("enum Color { RED, GREEN = 2, BLUE };\n").unwrap();
    let Record::Enum(color) = &output.records[0] else {
        panic!("expected an enum");
    };
    assert_eq!(color.name.as_deref(), Some("Color"));
    let values: Vec<_> = color
        .enumerators
        .iter()
        .map(|e| (e.name.as_str(), e.value.as_deref()))
        .collect();
    assert_eq!(values, vec![("RED", None), ("GREEN", Some("2")), ("BLUE", None)]);
}

#[test]
fn preprocessor_lines() {
    let source = r#"#include <stdio.h>
#include "local.h"
#define VERSION 3
#define EMPTY
#define MAX(a, b) ((a) > (b) ? (a) : (b))
#pragma once
"#;
    let output = extract_source(source).unwrap();
    assert_eq!(output.records.len(), 6);

    match &output.records[0] {
        Record::Include(i) => {
            assert_eq!(i.text, "<stdio.h>");
            assert!(i.system);
            assert_eq!(i.local_path(), None);
        }
        other => panic!("{other:?}"),
    }
    match &output.records[1] {
        Record::Include(i) => {
            assert!(!i.system);
            assert_eq!(i.local_path(), Some("local.h"));
        }
        other => panic!("{other:?}"),
    }
    match &output.records[2] {
        Record::Define(d) => {
            assert_eq!(d.name, "VERSION");
            assert_eq!(d.value.as_deref(), Some("3"));
        }
        other => panic!("{other:?}"),
    }
    match &output.records[3] {
        Record::Define(d) => {
            assert_eq!(d.name, "EMPTY");
            assert_eq!(d.value, None);
        }
        other => panic!("{other:?}"),
    }
    match &output.records[4] {
        Record::MacroDefine(m) => {
            assert_eq!(m.name, "MAX");
            assert_eq!(m.params, vec!["a", "b"]);
            assert_eq!(m.definition.as_deref(), Some("((a) > (b) ? (a) : (b))"));
        }
        other => panic!("{other:?}"),
    }
    match &output.records[5] {
        Record::Directive(d) => {
            assert_eq!(d.name, "#pragma");
            assert_eq!(d.argument.as_deref(), Some("once"));
        }
        other => panic!("{other:?}"),
    }
}

#[test]
fn comments_are_cleaned() {
    let output = extract_source("// line comment\n/* block\n   comment */\n").unwrap();
    let texts: Vec<_> = output
        .records
        .iter()
        .map(|r| match r {
            Record::Comment(c) => c.text.as_str(),
            other => panic!("{other:?}"),
        })
        .collect();
    assert_eq!(texts, vec!["line comment", "block\n   comment"]);
}

#[test]
fn extern_c_block_is_marked_and_scanned() {
    let source = "extern \"C\" {\nint c_api(int x);\n}\n";
    let output = extract_source(source).unwrap();
    assert!(matches!(&output.records[0], Record::Extern(e) if e.text == "\"C\"{"));
    assert!(output
        .records
        .iter()
        .any(|r| matches!(r, Record::Function(f) if f.name == "c_api")));
}

#[test]
fn namespaces_are_scanned_through() {
    let source = "int before;\nnamespace ns {\nint inside;\n}\nint after;\n";
    let output = extract_source(source).unwrap();

    let names: Vec<_> = output
        .records
        .iter()
        .filter_map(|r| match r {
            Record::Variable(v) => Some(v.name.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["before", "inside", "after"]);
    assert!(output.diagnostics.is_empty());
}
