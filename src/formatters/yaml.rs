use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::core::records::{
    ClassRecord, ConditionalKind, ConditionalRecord, Document, FunctionRecord, ParamRecord, Record,
};

const INDENT: &str = "  ";

/// Renders a [`Document`] as YAML.
///
/// The top level is a sequence whose first item names the file. Nesting of
/// conditional blocks and class bodies becomes `block:` sequences.
pub struct YamlFormatter;

impl YamlFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_to_file(&self, document: &Document, output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_document(document))?;
        Ok(())
    }

    pub fn format_document(&self, document: &Document) -> String {
        let mut writer = YamlWriter::default();
        writer.entry(0, "- filename", &document.filename);
        for record in &document.records {
            writer.record(0, record);
        }
        writer.out
    }
}

impl Default for YamlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct YamlWriter {
    out: String,
}

impl YamlWriter {
    fn line(&mut self, level: usize, text: &str) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// `key: value`, as a literal block when the value spans lines.
    fn entry(&mut self, level: usize, key: &str, value: &str) {
        if value.contains('\n') {
            let indicator = if value.starts_with(' ') { "|2-" } else { "|-" };
            self.line(level, &format!("{}: {}", key, indicator));
            for text in value.lines() {
                if text.trim().is_empty() {
                    self.out.push('\n');
                } else {
                    self.line(level + 1, text);
                }
            }
        } else {
            self.line(level, &format!("{}: {}", key, scalar(value)));
        }
    }

    fn opt_entry(&mut self, level: usize, key: &str, value: Option<&str>) {
        if let Some(value) = value {
            self.entry(level, key, value);
        }
    }

    fn list(&mut self, level: usize, key: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        self.line(level, &format!("{}:", key));
        for item in items {
            self.line(level + 1, &format!("- {}", scalar(item)));
        }
    }

    fn block(&mut self, level: usize, records: &[Record]) {
        if records.is_empty() {
            self.line(level, "block: []");
            return;
        }
        self.line(level, "block:");
        for record in records {
            self.record(level + 1, record);
        }
    }

    fn record(&mut self, level: usize, record: &Record) {
        let fields = level + 2;
        match record {
            Record::Function(function) => {
                self.line(level, "- function:");
                self.function(fields, function);
            }
            Record::Variable(variable) => {
                self.line(level, "- variable:");
                self.entry(fields, "idx", &variable.idx.to_string());
                self.entry(fields, "id", &variable.name);
                self.entry(fields, "type", &variable.ty);
                self.list(fields, "qualifiers", &variable.qualifiers);
            }
            Record::Typedef(typedef) => {
                self.line(level, "- typedef:");
                self.entry(fields, "idx", &typedef.idx.to_string());
                self.opt_entry(fields, "id", typedef.name.as_deref());
                self.opt_entry(fields, "type", typedef.underlying.as_deref());
                self.opt_entry(fields, "signature", typedef.signature.as_deref());
                self.list(fields, "qualifiers", &typedef.qualifiers);
            }
            Record::Class(class) => {
                self.line(level, &format!("- {}:", class.class_kind.as_str()));
                self.class(fields, class);
            }
            Record::Enum(record) => {
                self.line(level, "- enum:");
                self.entry(fields, "idx", &record.idx.to_string());
                self.opt_entry(fields, "id", record.name.as_deref());
                if !record.enumerators.is_empty() {
                    self.line(fields, "values:");
                    for enumerator in &record.enumerators {
                        self.entry(fields + 1, "- id", &enumerator.name);
                        self.opt_entry(fields + 2, "value", enumerator.value.as_deref());
                    }
                }
            }
            Record::Conditional(conditional) => self.conditional(level, conditional),
            Record::Include(include) => {
                self.line(level, "- include:");
                self.entry(fields, "idx", &include.idx.to_string());
                self.entry(fields, "path", &include.text);
                if include.system {
                    self.line(fields, "system: true");
                }
            }
            Record::Define(define) => {
                self.line(level, "- define:");
                self.entry(fields, "idx", &define.idx.to_string());
                self.entry(fields, "id", &define.name);
                self.opt_entry(fields, "value", define.value.as_deref());
            }
            Record::MacroDefine(define) => {
                self.line(level, "- macro:");
                self.entry(fields, "idx", &define.idx.to_string());
                self.entry(fields, "id", &define.name);
                self.list(fields, "params", &define.params);
                self.opt_entry(fields, "definition", define.definition.as_deref());
            }
            Record::Directive(directive) => {
                self.line(level, "- directive:");
                self.entry(fields, "idx", &directive.idx.to_string());
                self.entry(fields, "id", &directive.name);
                self.opt_entry(fields, "argument", directive.argument.as_deref());
            }
            Record::Extern(record) => {
                self.line(level, "- extern:");
                self.entry(fields, "idx", &record.idx.to_string());
                self.entry(fields, "text", &record.text);
            }
            Record::Comment(comment) => {
                self.line(level, "- comment:");
                self.entry(fields, "idx", &comment.idx.to_string());
                self.entry(fields, "text", &comment.text);
            }
        }
    }

    fn function(&mut self, level: usize, function: &FunctionRecord) {
        self.entry(level, "idx", &function.idx.to_string());
        self.list(level, "funcQualifier", &function.qualifiers);
        self.opt_entry(level, "return", function.return_type.as_deref());
        self.list(level, "returnQualifiers", &function.return_qualifiers);
        self.entry(level, "id", &function.name);
        self.list(level, "class", &function.class_path);
        if let Some(access) = &function.access {
            self.list(level, "qualifiers", std::slice::from_ref(access));
        }
        if function.params.is_empty() {
            self.line(level, "params: []");
        } else {
            self.line(level, "params:");
            for param in &function.params {
                self.param(level + 1, param);
            }
        }
        self.opt_entry(level, "funcDecl", function.body.as_deref());
    }

    fn param(&mut self, level: usize, param: &ParamRecord) {
        self.entry(level, "- id", &param.name);
        let fields = level + 1;
        self.opt_entry(fields, "type", param.ty.as_deref());
        self.line(fields, &format!("isPrimitive: {}", param.is_primitive));
        self.opt_entry(fields, "default", param.default.as_deref());
        self.list(fields, "qualifier", &param.qualifiers);
        self.opt_entry(fields, "signature", param.signature.as_deref());
    }

    fn class(&mut self, level: usize, class: &ClassRecord) {
        self.entry(level, "idx", &class.idx.to_string());
        self.entry(level, "id", &class.name);
        self.opt_entry(level, "base", class.base.as_deref());
        if class.is_forward_declaration {
            self.line(level, "isForwardDecl: true");
        } else {
            self.block(level, &class.members);
        }
    }

    fn conditional(&mut self, level: usize, conditional: &ConditionalRecord) {
        let fields = level + 2;
        let condition = conditional.condition.as_deref();
        match conditional.conditional_kind {
            ConditionalKind::IfDef | ConditionalKind::IfNDef => {
                self.line(level, "- CONDITION:");
                let key = if conditional.conditional_kind == ConditionalKind::IfDef {
                    "defined"
                } else {
                    "not_defined"
                };
                self.opt_entry(fields, key, condition);
            }
            ConditionalKind::If | ConditionalKind::Elif => {
                let tag = if conditional.conditional_kind == ConditionalKind::If {
                    "- IF:"
                } else {
                    "- ELIF:"
                };
                self.line(level, tag);
                self.opt_entry(fields, "raw", condition);
                self.list(fields, "tests", &conditional.tested);
            }
            ConditionalKind::Else => self.line(level, "- ELSE:"),
        }
        self.entry(fields, "idx", &conditional.idx.to_string());
        self.block(fields, &conditional.records);
    }
}

/// Renders a single-line scalar, single-quoted when it would otherwise be
/// read as YAML syntax.
pub fn scalar(value: &str) -> String {
    if needs_quotes(value) {
        format!("'{}'", value.replace('\'', "''"))
    } else {
        value.to_string()
    }
}

fn needs_quotes(value: &str) -> bool {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
        '`',
    ];
    const KEYWORDS: &[&str] = &["true", "false", "null", "~", "yes", "no"];

    value.is_empty()
        || value.trim() != value
        || value.starts_with(INDICATORS)
        || value.contains(": ")
        || value.contains(" #")
        || value.ends_with(':')
        || KEYWORDS.contains(&value.to_ascii_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::scalar;

    #[test]
    fn plain_scalars_stay_plain() {
        assert_eq!(scalar("int"), "int");
        assert_eq!(scalar("std::string"), "std::string");
        assert_eq!(scalar("42"), "42");
    }

    #[test]
    fn ambiguous_scalars_are_quoted() {
        assert_eq!(scalar("label:"), "'label:'");
        assert_eq!(scalar("\"x\""), "'\"x\"'");
        assert_eq!(scalar("*"), "'*'");
        assert_eq!(scalar("`+=`"), "'`+=`'");
        assert_eq!(scalar("it's: here"), "'it''s: here'");
        assert_eq!(scalar(""), "''");
        assert_eq!(scalar("true"), "'true'");
    }
}
