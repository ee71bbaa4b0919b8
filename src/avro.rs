use serde_json::Value;
use std::collections::HashMap;

/// The closed set of Avro primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "null" => Primitive::Null,
            "boolean" => Primitive::Boolean,
            "int" => Primitive::Int,
            "long" => Primitive::Long,
            "float" => Primitive::Float,
            "double" => Primitive::Double,
            "bytes" => Primitive::Bytes,
            "string" => Primitive::String,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Null => "null",
            Primitive::Boolean => "boolean",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Bytes => "bytes",
            Primitive::String => "string",
        }
    }
}

/// Logical types understood by the generator.
///
/// `Decimal` is the only one carrying parameters; the others are name-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Decimal { precision: u32, scale: u32 },
    Uuid,
    Date,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
}

impl LogicalType {
    pub fn name(&self) -> &'static str {
        match self {
            LogicalType::Decimal { .. } => "decimal",
            LogicalType::Uuid => "uuid",
            LogicalType::Date => "date",
            LogicalType::TimeMillis => "time-millis",
            LogicalType::TimeMicros => "time-micros",
            LogicalType::TimestampMillis => "timestamp-millis",
            LogicalType::TimestampMicros => "timestamp-micros",
        }
    }

    /// Whether this logical type may annotate the given primitive.
    ///
    /// `decimal` on `fixed` is checked separately since `fixed` is not a primitive.
    pub fn accepts(&self, base: Primitive) -> bool {
        matches!(
            (self, base),
            (LogicalType::Decimal { .. }, Primitive::Bytes)
                | (LogicalType::Uuid, Primitive::String)
                | (LogicalType::Date, Primitive::Int)
                | (LogicalType::TimeMillis, Primitive::Int)
                | (LogicalType::TimeMicros, Primitive::Long)
                | (LogicalType::TimestampMillis, Primitive::Long)
                | (LogicalType::TimestampMicros, Primitive::Long)
        )
    }
}

/// One node of a validated Avro schema tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Primitive(Primitive),
    Logical(LogicalSchema),
    Union(Vec<Schema>),
    Array(Box<Schema>),
    Map(Box<Schema>),
    Enum(EnumSchema),
    Fixed(FixedSchema),
    Record(RecordSchema),
    /// A named type used by name after its definition (or inside it).
    Reference(Reference),
}

impl Schema {
    /// `null` itself, or a union with a `null` member.
    pub fn is_nullable(&self) -> bool {
        match self {
            Schema::Primitive(Primitive::Null) => true,
            Schema::Union(alternatives) => alternatives
                .iter()
                .any(|alt| matches!(alt, Schema::Primitive(Primitive::Null))),
            _ => false,
        }
    }

    /// Short type label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Schema::Primitive(p) => p.as_str(),
            Schema::Logical(l) => l.logical_type.name(),
            Schema::Union(_) => "union",
            Schema::Array(_) => "array",
            Schema::Map(_) => "map",
            Schema::Enum(_) => "enum",
            Schema::Fixed(_) => "fixed",
            Schema::Record(_) => "record",
            Schema::Reference(_) => "reference",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogicalSchema {
    pub logical_type: LogicalType,
    /// A `Schema::Primitive`, or a `Schema::Fixed` for fixed-backed decimals.
    pub base: Box<Schema>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub name: String,
    pub namespace: Option<String>,
    pub aliases: Vec<String>,
    pub symbols: Vec<String>,
    pub doc: Option<String>,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixedSchema {
    pub name: String,
    /// Effective namespace, inherited from the enclosing type when not declared.
    pub namespace: Option<String>,
    /// The `namespace` key as written on this schema.
    pub declared_namespace: Option<String>,
    pub aliases: Vec<String>,
    pub size: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: String,
    /// Effective namespace, inherited from the enclosing type when not declared.
    pub namespace: Option<String>,
    /// The `namespace` key as written on this schema.
    pub declared_namespace: Option<String>,
    pub aliases: Vec<String>,
    pub doc: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub schema: Schema,
    /// `Some(Value::Null)` is an explicit `null` default, `None` means no default.
    pub default: Option<Value>,
    pub doc: Option<String>,
}

impl Field {
    /// Fields that must be rendered after the mandatory ones.
    pub fn is_optional(&self) -> bool {
        self.default.is_some() || self.schema.is_nullable()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub fullname: String,
}

impl Reference {
    pub fn name(&self) -> &str {
        short_name(&self.fullname)
    }
}

/// Full name of a named type: dotted names are already full, otherwise the
/// namespace (if any) is prepended.
pub fn fullname(name: &str, namespace: Option<&str>) -> String {
    match namespace {
        Some(ns) if !ns.is_empty() && !name.contains('.') => format!("{ns}.{name}"),
        _ => name.to_string(),
    }
}

/// Last segment of a dotted full name.
pub fn short_name(fullname: &str) -> &str {
    fullname.rsplit('.').next().unwrap_or(fullname)
}

impl RecordSchema {
    pub fn fullname(&self) -> String {
        fullname(&self.name, self.namespace.as_deref())
    }
}

impl EnumSchema {
    pub fn fullname(&self) -> String {
        fullname(&self.name, self.namespace.as_deref())
    }
}

impl FixedSchema {
    pub fn fullname(&self) -> String {
        fullname(&self.name, self.namespace.as_deref())
    }
}

/// A schema that passed validation, with every named type indexed by full name.
#[derive(Debug, Clone)]
pub struct ValidatedSchema {
    pub root: RecordSchema,
    pub named_types: HashMap<String, Schema>,
}

impl ValidatedSchema {
    pub fn lookup(&self, reference: &Reference) -> Option<&Schema> {
        self.named_types.get(&reference.fullname)
    }
}
