use serde::Serialize;

/// Name given to parameters declared without an identifier.
pub const UNNAMED_PARAM: &str = "-nil-";

/// One extracted unit of a header's surface, in encounter order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Record {
    Function(FunctionRecord),
    Variable(VariableRecord),
    Typedef(TypedefRecord),
    Class(ClassRecord),
    Enum(EnumRecord),
    Conditional(ConditionalRecord),
    Include(IncludeRecord),
    Define(DefineRecord),
    MacroDefine(MacroDefineRecord),
    Directive(DirectiveRecord),
    Extern(ExternRecord),
    Comment(CommentRecord),
}

impl Record {
    pub fn idx(&self) -> usize {
        match self {
            Record::Function(r) => r.idx,
            Record::Variable(r) => r.idx,
            Record::Typedef(r) => r.idx,
            Record::Class(r) => r.idx,
            Record::Enum(r) => r.idx,
            Record::Conditional(r) => r.idx,
            Record::Include(r) => r.idx,
            Record::Define(r) => r.idx,
            Record::MacroDefine(r) => r.idx,
            Record::Directive(r) => r.idx,
            Record::Extern(r) => r.idx,
            Record::Comment(r) => r.idx,
        }
    }

    /// Records nested inside a conditional branch or class body.
    pub fn nested(&self) -> &[Record] {
        match self {
            Record::Conditional(r) => &r.records,
            Record::Class(r) => &r.members,
            _ => &[],
        }
    }
}

/// Walks records depth-first in document order.
pub fn walk_records<'r>(records: &'r [Record], visit: &mut impl FnMut(&'r Record)) {
    for record in records {
        visit(record);
        walk_records(record.nested(), visit);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub idx: usize,
    pub name: String,
    /// inline, static, virtual, explicit, friend, const, noexcept, ...
    pub qualifiers: Vec<String>,
    pub return_type: Option<String>,
    pub return_qualifiers: Vec<String>,
    /// Names (and base clauses) of the classes enclosing the declaration
    pub class_path: Vec<String>,
    pub access: Option<String>,
    pub params: Vec<ParamRecord>,
    /// Verbatim body text for definitions
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Option<String>,
    pub is_primitive: bool,
    pub default: Option<String>,
    pub qualifiers: Vec<String>,
    /// Declarator text of a function-pointer parameter
    pub signature: Option<String>,
}

impl Default for ParamRecord {
    fn default() -> Self {
        Self {
            name: UNNAMED_PARAM.to_string(),
            ty: None,
            is_primitive: false,
            default: None,
            qualifiers: Vec::new(),
            signature: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRecord {
    pub idx: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub qualifiers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedefRecord {
    pub idx: usize,
    /// The alias being introduced
    pub name: Option<String>,
    pub underlying: Option<String>,
    /// Declarator text of a function-pointer typedef
    pub signature: Option<String>,
    pub qualifiers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Struct,
    Union,
}

impl ClassKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Struct => "struct",
            ClassKind::Union => "union",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub idx: usize,
    pub class_kind: ClassKind,
    pub name: String,
    /// Base clause without its leading colon, e.g. `public Base`
    pub base: Option<String>,
    pub is_forward_declaration: bool,
    pub members: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumRecord {
    pub idx: usize,
    pub name: Option<String>,
    pub enumerators: Vec<Enumerator>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enumerator {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionalKind {
    IfDef,
    IfNDef,
    If,
    Elif,
    Else,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalRecord {
    pub idx: usize,
    pub conditional_kind: ConditionalKind,
    /// Tested identifier for `#ifdef`/`#ifndef`, raw expression otherwise
    pub condition: Option<String>,
    /// Identifiers tested through `defined`
    pub tested: Vec<String>,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncludeRecord {
    pub idx: usize,
    /// Literal path text including its quotes or angle brackets
    pub text: String,
    pub system: bool,
}

impl IncludeRecord {
    /// Path of a quoted include, the only kind that is followed.
    pub fn local_path(&self) -> Option<&str> {
        self.text
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefineRecord {
    pub idx: usize,
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroDefineRecord {
    pub idx: usize,
    pub name: String,
    pub params: Vec<String>,
    pub definition: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectiveRecord {
    pub idx: usize,
    pub name: String,
    pub argument: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExternRecord {
    pub idx: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRecord {
    pub idx: usize,
    pub text: String,
}

/// Everything extracted from one header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub filename: String,
    pub records: Vec<Record>,
}

impl Document {
    pub fn new(filename: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            filename: filename.into(),
            records,
        }
    }

    /// `idx` values in document order, nested records included.
    pub fn indices(&self) -> Vec<usize> {
        let mut indices = Vec::new();
        walk_records(&self.records, &mut |record| indices.push(record.idx()));
        indices
    }

    pub fn includes(&self) -> Vec<&IncludeRecord> {
        let mut includes = Vec::new();
        walk_records(&self.records, &mut |record| {
            if let Record::Include(include) = record {
                includes.push(include);
            }
        });
        includes
    }
}
