//! Renderable fragments of a generated Python module.
//!
//! Each fragment is plain data; its `Display` impl owns the layout, so
//! indentation and blank-line rules live here and nowhere else.
use std::collections::BTreeSet;
use std::fmt;

/// `name: type` with an optional ` = default`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTemplate {
    pub name: String,
    pub type_hint: String,
    pub default: Option<String>,
}

impl fmt::Display for FieldTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.type_hint)?;
        if let Some(default) = &self.default {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

/// The nested `class Meta:` block carrying schema-level properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTemplate {
    /// `(attribute, rendered python value)` pairs, in output order.
    pub properties: Vec<(&'static str, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTemplate<'a> {
    pub decorator: Option<&'a str>,
    pub name: &'a str,
    pub base_class: &'a str,
    pub docstring: Option<&'a str>,
    pub fields: Vec<FieldTemplate>,
    pub meta: Option<MetaTemplate>,
    pub indent: &'a str,
}

impl fmt::Display for ClassTemplate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(decorator) = self.decorator {
            writeln!(f, "{decorator}")?;
        }
        writeln!(f, "class {}({}):", self.name, self.base_class)?;
        if let Some(doc) = self.docstring {
            write_docstring(f, doc, self.indent)?;
        }
        for field in &self.fields {
            writeln!(f, "{}{field}", self.indent)?;
        }
        if self.fields.is_empty() && self.docstring.is_none() && self.meta.is_none() {
            writeln!(f, "{}pass", self.indent)?;
        }
        if let Some(meta) = &self.meta {
            if !self.fields.is_empty() || self.docstring.is_some() {
                writeln!(f)?;
            }
            writeln!(f, "{}class Meta:", self.indent)?;
            for (name, value) in &meta.properties {
                writeln!(f, "{0}{0}{name} = {value}", self.indent)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTemplate<'a> {
    pub name: &'a str,
    pub docstring: Option<&'a str>,
    /// `(member name, rendered value)` pairs.
    pub symbols: Vec<(String, String)>,
    pub indent: &'a str,
}

impl fmt::Display for EnumTemplate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "class {}(enum.Enum):", self.name)?;
        if let Some(doc) = self.docstring {
            write_docstring(f, doc, self.indent)?;
        }
        for (key, value) in &self.symbols {
            writeln!(f, "{}{key} = {value}", self.indent)?;
        }
        Ok(())
    }
}

/// Imports, then auxiliary definitions, then classes; blocks are separated
/// by two blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTemplate<'a> {
    pub imports: &'a BTreeSet<String>,
    pub extras: &'a [String],
    pub classes: &'a [String],
}

impl fmt::Display for ModuleTemplate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for import in self.imports {
            writeln!(f, "{import}")?;
        }
        for block in self.extras.iter().chain(self.classes) {
            write!(f, "\n\n{block}")?;
        }
        Ok(())
    }
}

fn write_docstring(f: &mut fmt::Formatter<'_>, doc: &str, indent: &str) -> fmt::Result {
    writeln!(f, "{indent}\"\"\"")?;
    for line in doc.replace("\"\"\"", "\\\"\\\"\\\"").lines() {
        let line = line.trim_end();
        if line.is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, "{indent}{line}")?;
        }
    }
    writeln!(f, "{indent}\"\"\"")
}
