//! Schema validation: turns a JSON schema tree into a [`ValidatedSchema`].
//!
//! Validation and parsing are one pass. Every structural problem is reported
//! as a [`SchemaError`] with the path of the offending node, and nothing is
//! rendered from a schema that did not make it through here.
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

use crate::avro::{
    EnumSchema, Field, FixedSchema, LogicalSchema, LogicalType, Primitive, RecordSchema,
    Reference, Schema, ValidatedSchema, fullname,
};
use crate::common::names::{is_avro_fullname, is_avro_name};
use crate::error::SchemaError;

type Result<T> = std::result::Result<T, SchemaError>;

/// Validate one top-level record schema.
pub fn validate_schema(schema: &Value) -> Result<ValidatedSchema> {
    let path = schema
        .get("name")
        .and_then(|n| n.as_str())
        .unwrap_or("<root>")
        .to_string();

    let obj = match schema {
        Value::Object(obj) if matches!(type_tag(obj), Some("record" | "error")) => obj,
        other => {
            return Err(SchemaError::NotARecord {
                path,
                found: describe(other),
            });
        }
    };

    let mut validator = Validator::default();
    let root = validator.parse_record(obj, None, &path)?;
    Ok(ValidatedSchema {
        root,
        named_types: validator.named_types,
    })
}

/// Validate every schema of a module; the first failure wins.
pub fn validate_schemas(schemas: &[Value]) -> Result<Vec<ValidatedSchema>> {
    schemas.iter().map(validate_schema).collect()
}

#[derive(Default)]
struct Validator {
    /// Full names registered so far, including records whose fields are still being parsed.
    defined: HashSet<String>,
    named_types: HashMap<String, Schema>,
}

impl Validator {
    fn parse_type(&mut self, value: &Value, namespace: Option<&str>, path: &str) -> Result<Schema> {
        match value {
            Value::String(token) => self.parse_token(token, namespace, path),
            Value::Array(members) => self.parse_union(members, namespace, path),
            Value::Object(obj) => self.parse_object(obj, namespace, path),
            other => Err(SchemaError::InvalidValue {
                path: path.to_string(),
                key: "type",
                detail: format!("expected a string, list or object, found {}", describe(other)),
            }),
        }
    }

    fn parse_token(&self, token: &str, namespace: Option<&str>, path: &str) -> Result<Schema> {
        if let Some(primitive) = Primitive::from_name(token) {
            return Ok(Schema::Primitive(primitive));
        }
        self.resolve_reference(token, namespace)
            .map(Schema::Reference)
            .ok_or_else(|| SchemaError::UnknownType {
                path: path.to_string(),
                token: token.to_string(),
            })
    }

    fn resolve_reference(&self, token: &str, namespace: Option<&str>) -> Option<Reference> {
        let qualified = fullname(token, namespace);
        [qualified.as_str(), token]
            .into_iter()
            .find(|candidate| self.defined.contains(*candidate))
            .map(|found| Reference {
                fullname: found.to_string(),
            })
    }

    fn parse_object(
        &mut self,
        obj: &Map<String, Value>,
        namespace: Option<&str>,
        path: &str,
    ) -> Result<Schema> {
        let tag = match obj.get("type") {
            Some(Value::String(tag)) => tag.as_str(),
            Some(nested @ (Value::Object(_) | Value::Array(_))) => {
                return self.parse_type(nested, namespace, path);
            }
            Some(other) => {
                return Err(SchemaError::InvalidValue {
                    path: path.to_string(),
                    key: "type",
                    detail: format!("expected a type name, found {}", describe(other)),
                });
            }
            None => {
                return Err(SchemaError::MissingKey {
                    path: path.to_string(),
                    kind: "schema".to_string(),
                    key: "type",
                });
            }
        };

        match tag {
            "record" | "error" => self.parse_record(obj, namespace, path).map(Schema::Record),
            "enum" => self.parse_enum(obj, namespace, path).map(Schema::Enum),
            "fixed" => self.parse_fixed(obj, namespace, path),
            "array" => {
                let items = required(obj, "items", "array", path)?;
                let items = self.parse_type(items, namespace, &format!("{path}.items"))?;
                Ok(Schema::Array(Box::new(items)))
            }
            "map" => {
                let values = required(obj, "values", "map", path)?;
                let values = self.parse_type(values, namespace, &format!("{path}.values"))?;
                Ok(Schema::Map(Box::new(values)))
            }
            token => match Primitive::from_name(token) {
                Some(primitive) => apply_logical(primitive, obj, path),
                None => self.parse_token(token, namespace, path),
            },
        }
    }

    fn parse_union(&mut self, members: &[Value], namespace: Option<&str>, path: &str) -> Result<Schema> {
        if members.is_empty() {
            return Err(SchemaError::InvalidUnion {
                path: path.to_string(),
                detail: "a union needs at least one member".to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut alternatives = Vec::with_capacity(members.len());
        for (idx, member) in members.iter().enumerate() {
            let member_path = format!("{path}[{idx}]");
            let alternative = self.parse_type(member, namespace, &member_path)?;
            if matches!(alternative, Schema::Union(_)) {
                return Err(SchemaError::InvalidUnion {
                    path: member_path,
                    detail: "unions may not immediately contain other unions".to_string(),
                });
            }
            let key = union_key(&alternative);
            if !seen.insert(key.clone()) {
                return Err(SchemaError::InvalidUnion {
                    path: member_path,
                    detail: format!("duplicate member '{key}'"),
                });
            }
            alternatives.push(alternative);
        }
        Ok(Schema::Union(alternatives))
    }

    fn parse_record(
        &mut self,
        obj: &Map<String, Value>,
        enclosing_namespace: Option<&str>,
        path: &str,
    ) -> Result<RecordSchema> {
        let (name, namespace) = named(obj, "record", enclosing_namespace, path)?;
        let full = self.define(&name, namespace.as_deref(), path)?;

        let fields_value = required(obj, "fields", "record", path)?;
        let Value::Array(raw_fields) = fields_value else {
            return Err(SchemaError::InvalidValue {
                path: path.to_string(),
                key: "fields",
                detail: format!("expected a list, found {}", describe(fields_value)),
            });
        };

        let mut field_names = HashSet::new();
        let mut fields = Vec::with_capacity(raw_fields.len());
        for (idx, raw) in raw_fields.iter().enumerate() {
            let field_path = format!("{path}.fields[{idx}]");
            let Value::Object(field_obj) = raw else {
                return Err(SchemaError::InvalidValue {
                    path: field_path,
                    key: "fields",
                    detail: format!("expected an object, found {}", describe(raw)),
                });
            };
            let field = self.parse_field(field_obj, namespace.as_deref(), &field_path)?;
            if !field_names.insert(field.name.clone()) {
                return Err(SchemaError::DuplicateName {
                    path: field_path,
                    what: "field",
                    name: field.name,
                });
            }
            fields.push(field);
        }

        let record = RecordSchema {
            name,
            namespace,
            declared_namespace: optional_str(obj, "namespace", path)?,
            aliases: aliases(obj, path)?,
            doc: optional_str(obj, "doc", path)?,
            fields,
        };
        self.named_types.insert(full, Schema::Record(record.clone()));
        Ok(record)
    }

    fn parse_field(
        &mut self,
        obj: &Map<String, Value>,
        namespace: Option<&str>,
        path: &str,
    ) -> Result<Field> {
        let name = required_str(obj, "name", "field", path)?;
        if !is_avro_name(&name) {
            return Err(SchemaError::InvalidName {
                path: path.to_string(),
                name,
            });
        }

        let type_value = required(obj, "type", "field", path)?;
        let mut schema = self.parse_type(type_value, namespace, &format!("{path}.type"))?;

        // A `logicalType` next to a primitive type name on the field itself.
        if obj.contains_key("logicalType") {
            if let Schema::Primitive(primitive) = schema {
                schema = apply_logical(primitive, obj, path)?;
            }
        }

        Ok(Field {
            name,
            schema,
            default: obj.get("default").cloned(),
            doc: optional_str(obj, "doc", path)?,
        })
    }

    fn parse_enum(
        &mut self,
        obj: &Map<String, Value>,
        enclosing_namespace: Option<&str>,
        path: &str,
    ) -> Result<EnumSchema> {
        let (name, namespace) = named(obj, "enum", enclosing_namespace, path)?;
        let full = self.define(&name, namespace.as_deref(), path)?;

        let raw_symbols = required(obj, "symbols", "enum", path)?;
        let Value::Array(raw_symbols) = raw_symbols else {
            return Err(SchemaError::InvalidValue {
                path: path.to_string(),
                key: "symbols",
                detail: format!("expected a list, found {}", describe(raw_symbols)),
            });
        };

        let mut symbols: Vec<String> = Vec::with_capacity(raw_symbols.len());
        for raw in raw_symbols {
            let Some(symbol) = raw.as_str() else {
                return Err(SchemaError::InvalidValue {
                    path: path.to_string(),
                    key: "symbols",
                    detail: format!("expected a string symbol, found {}", describe(raw)),
                });
            };
            if !is_avro_name(symbol) {
                return Err(SchemaError::InvalidName {
                    path: path.to_string(),
                    name: symbol.to_string(),
                });
            }
            if symbols.iter().any(|s| s == symbol) {
                return Err(SchemaError::DuplicateName {
                    path: path.to_string(),
                    what: "symbol",
                    name: symbol.to_string(),
                });
            }
            symbols.push(symbol.to_string());
        }

        let default = optional_str(obj, "default", path)?;
        if let Some(default) = &default {
            if !symbols.contains(default) {
                return Err(SchemaError::InvalidValue {
                    path: path.to_string(),
                    key: "default",
                    detail: format!("'{default}' is not one of the enum symbols"),
                });
            }
        }

        let schema = EnumSchema {
            name,
            namespace,
            aliases: aliases(obj, path)?,
            symbols,
            doc: optional_str(obj, "doc", path)?,
            default,
        };
        self.named_types.insert(full, Schema::Enum(schema.clone()));
        Ok(schema)
    }

    fn parse_fixed(
        &mut self,
        obj: &Map<String, Value>,
        enclosing_namespace: Option<&str>,
        path: &str,
    ) -> Result<Schema> {
        let (name, namespace) = named(obj, "fixed", enclosing_namespace, path)?;
        let full = self.define(&name, namespace.as_deref(), path)?;

        let size_value = required(obj, "size", "fixed", path)?;
        let size = size_value.as_u64().ok_or_else(|| SchemaError::InvalidValue {
            path: path.to_string(),
            key: "size",
            detail: format!("expected a non-negative integer, found {size_value}"),
        })?;

        let fixed = FixedSchema {
            name,
            namespace,
            declared_namespace: optional_str(obj, "namespace", path)?,
            aliases: aliases(obj, path)?,
            size,
        };
        let schema = match obj.get("logicalType").and_then(|l| l.as_str()) {
            Some("decimal") => Schema::Logical(LogicalSchema {
                logical_type: decimal_params(obj, path)?,
                base: Box::new(Schema::Fixed(fixed)),
            }),
            Some(other) => {
                tracing::warn!(path, logical_type = other, "ignoring logical type on fixed");
                Schema::Fixed(fixed)
            }
            None => Schema::Fixed(fixed),
        };
        // References to a decimal fixed keep the decimal.
        self.named_types.insert(full, schema.clone());
        Ok(schema)
    }

    /// Register a named type before its body is parsed, so that the body may
    /// refer to it.
    fn define(&mut self, name: &str, namespace: Option<&str>, path: &str) -> Result<String> {
        let full = fullname(name, namespace);
        if Primitive::from_name(name).is_some() || !self.defined.insert(full.clone()) {
            return Err(SchemaError::DuplicateName {
                path: path.to_string(),
                what: "type",
                name: full,
            });
        }
        Ok(full)
    }
}

/// Wrap a primitive in its logical type, if the annotation applies.
///
/// Unknown logical types, and known ones on the wrong base type, are ignored.
fn apply_logical(primitive: Primitive, obj: &Map<String, Value>, path: &str) -> Result<Schema> {
    let base = Schema::Primitive(primitive);
    let name = match obj.get("logicalType") {
        None => return Ok(base),
        Some(Value::String(name)) => name.as_str(),
        Some(other) => {
            return Err(SchemaError::InvalidValue {
                path: path.to_string(),
                key: "logicalType",
                detail: format!("expected a string, found {}", describe(other)),
            });
        }
    };

    let logical_type = match name {
        "decimal" => decimal_params(obj, path)?,
        "uuid" => LogicalType::Uuid,
        "date" => LogicalType::Date,
        "time-millis" => LogicalType::TimeMillis,
        "time-micros" => LogicalType::TimeMicros,
        "timestamp-millis" => LogicalType::TimestampMillis,
        "timestamp-micros" => LogicalType::TimestampMicros,
        unknown => {
            tracing::warn!(path, logical_type = unknown, "ignoring unknown logical type");
            return Ok(base);
        }
    };

    if !logical_type.accepts(primitive) {
        tracing::warn!(
            path,
            logical_type = name,
            base = primitive.as_str(),
            "ignoring logical type on incompatible base type"
        );
        return Ok(base);
    }

    Ok(Schema::Logical(LogicalSchema {
        logical_type,
        base: Box::new(base),
    }))
}

fn decimal_params(obj: &Map<String, Value>, path: &str) -> Result<LogicalType> {
    let precision = required(obj, "precision", "decimal", path)?;
    let precision = precision
        .as_u64()
        .and_then(|p| u32::try_from(p).ok())
        .filter(|p| *p > 0)
        .ok_or_else(|| SchemaError::InvalidValue {
            path: path.to_string(),
            key: "precision",
            detail: format!("expected a positive integer, found {precision}"),
        })?;

    let scale = match obj.get("scale") {
        None => 0,
        Some(scale) => scale
            .as_u64()
            .and_then(|s| u32::try_from(s).ok())
            .filter(|s| *s <= precision)
            .ok_or_else(|| SchemaError::InvalidValue {
                path: path.to_string(),
                key: "scale",
                detail: format!("expected an integer between 0 and {precision}, found {scale}"),
            })?,
    };

    Ok(LogicalType::Decimal { precision, scale })
}

/// Read `name` and the effective namespace of a named type.
fn named(
    obj: &Map<String, Value>,
    kind: &str,
    enclosing_namespace: Option<&str>,
    path: &str,
) -> Result<(String, Option<String>)> {
    let name = required_str(obj, "name", kind, path)?;
    if !is_avro_fullname(&name) {
        return Err(SchemaError::InvalidName {
            path: path.to_string(),
            name,
        });
    }

    if let Some((ns, _)) = name.rsplit_once('.') {
        return Ok((name.clone(), Some(ns.to_string())));
    }

    let namespace = match optional_str(obj, "namespace", path)? {
        Some(ns) if ns.is_empty() => None,
        Some(ns) if !is_avro_fullname(&ns) => {
            return Err(SchemaError::InvalidName {
                path: path.to_string(),
                name: ns,
            });
        }
        Some(ns) => Some(ns),
        None => enclosing_namespace.map(str::to_string),
    };
    Ok((name, namespace))
}

fn aliases(obj: &Map<String, Value>, path: &str) -> Result<Vec<String>> {
    match obj.get("aliases") {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| SchemaError::InvalidValue {
                        path: path.to_string(),
                        key: "aliases",
                        detail: format!("expected a string alias, found {}", describe(item)),
                    })
            })
            .collect(),
        Some(other) => Err(SchemaError::InvalidValue {
            path: path.to_string(),
            key: "aliases",
            detail: format!("expected a list, found {}", describe(other)),
        }),
    }
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    key: &'static str,
    kind: &str,
    path: &str,
) -> Result<&'a Value> {
    obj.get(key).ok_or_else(|| SchemaError::MissingKey {
        path: path.to_string(),
        kind: kind.to_string(),
        key,
    })
}

fn required_str(obj: &Map<String, Value>, key: &'static str, kind: &str, path: &str) -> Result<String> {
    let value = required(obj, key, kind, path)?;
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| SchemaError::InvalidValue {
            path: path.to_string(),
            key,
            detail: format!("expected a string, found {}", describe(value)),
        })
}

fn optional_str(obj: &Map<String, Value>, key: &'static str, path: &str) -> Result<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SchemaError::InvalidValue {
            path: path.to_string(),
            key,
            detail: format!("expected a string, found {}", describe(other)),
        }),
    }
}

fn type_tag(obj: &Map<String, Value>) -> Option<&str> {
    obj.get("type").and_then(|t| t.as_str())
}

/// Identity of a union member: unnamed kinds may appear once, named types once per name.
fn union_key(schema: &Schema) -> String {
    match schema {
        Schema::Primitive(p) => p.as_str().to_string(),
        Schema::Logical(logical) => union_key(&logical.base),
        Schema::Array(_) => "array".to_string(),
        Schema::Map(_) => "map".to_string(),
        Schema::Union(_) => "union".to_string(),
        Schema::Enum(e) => e.fullname(),
        Schema::Fixed(f) => f.fullname(),
        Schema::Record(r) => r.fullname(),
        Schema::Reference(r) => r.fullname.clone(),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(s) => format!("'{s}'"),
        Value::Array(_) => "a list".to_string(),
        Value::Object(obj) => match type_tag(obj) {
            Some(tag) => format!("a '{tag}' schema"),
            None => "an object".to_string(),
        },
    }
}
