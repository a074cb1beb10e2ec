use hdrdecl::core::records::{ClassKind, ClassRecord, Record};
use hdrdecl::extract_source;

fn class(record: &Record) -> &ClassRecord {
    match record {
        Record::Class(class) => class,
        other => panic!("expected a class, got {other:?}"),
    }
}

#[test]
fn derived_class_members_carry_path_and_access() {
    let source = "class Base {};\nclass Derived : public Base {\npublic:\n  void run();\n};\n";
    let output = extract_source(source).unwrap();
    assert_eq!(output.records.len(), 2);

    let base = class(&output.records[0]);
    assert_eq!(base.name, "Base");
    assert!(!base.is_forward_declaration);
    assert!(base.members.is_empty());

    let derived = class(&output.records[1]);
    assert_eq!(derived.name, "Derived");
    assert_eq!(derived.base.as_deref(), Some("public Base"));
    assert!(!derived.is_forward_declaration);
    assert_eq!(derived.members.len(), 1);

    let Record::Function(run) = &derived.members[0] else {
        panic!("expected run() inside Derived");
    };
    assert_eq!(run.name, "run");
    assert_eq!(run.class_path, vec!["Derived", "public Base"]);
    assert_eq!(run.access.as_deref(), Some("public"));
}

#[test]
fn forward_declaration_does_not_open_a_scope() {
    let output = extract_source("class Foo;\nvoid after();\n").unwrap();
    assert_eq!(output.records.len(), 2);

    let foo = class(&output.records[0]);
    assert_eq!(foo.name, "Foo");
    assert!(foo.is_forward_declaration);

    let Record::Function(after) = &output.records[1] else {
        panic!("expected after() at top level");
    };
    assert!(after.class_path.is_empty());
    assert_eq!(after.access, None);
}

#[test]
fn struct_fields_become_variables() {
    let output = extract_source("struct Point {\n  int x;\n  double y, z;\n};\n").unwrap();
    let point = class(&output.records[0]);
    assert_eq!(point.class_kind, ClassKind::Struct);

    let fields: Vec<_> = point
        .members
        .iter()
        .map(|member| match member {
            Record::Variable(v) => (v.name.as_str(), v.ty.as_str()),
            other => panic!("unexpected member {other:?}"),
        })
        .collect();
    assert_eq!(fields, vec![("x", "int"), ("y", "double"), ("z", "double")]);
}

#[test]
fn access_is_restored_after_nested_class() {
    let source = r#"class Outer {
public:
  struct Inner {
    void inner();
  };
  void after();
private:
  void hidden();
};
"#;
    let output = extract_source(source).unwrap();
    let outer = class(&output.records[0]);
    assert_eq!(outer.members.len(), 3);

    let inner = class(&outer.members[0]);
    let Record::Function(inner_fn) = &inner.members[0] else {
        panic!("expected inner()");
    };
    assert_eq!(inner_fn.class_path, vec!["Outer", "Inner"]);
    assert_eq!(inner_fn.access, None);

    let Record::Function(after) = &outer.members[1] else {
        panic!("expected after()");
    };
    assert_eq!(after.class_path, vec!["Outer"]);
    assert_eq!(after.access.as_deref(), Some("public"));

    let Record::Function(hidden) = &outer.members[2] else {
        panic!("expected hidden()");
    };
    assert_eq!(hidden.access.as_deref(), Some("private"));
}

#[test]
fn conditional_inside_class_body() {
    let source = "class Config {\n#ifdef DEBUG\n  void dump();\n#endif\n  int level;\n};\n";
    let output = extract_source(source).unwrap();
    let config = class(&output.records[0]);
    assert_eq!(config.members.len(), 2);
    assert!(matches!(&config.members[0], Record::Conditional(c) if c.records.len() == 1));
    assert!(matches!(&config.members[1], Record::Variable(v) if v.name == "level"));
}
