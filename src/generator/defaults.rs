use serde_json::Value;

use crate::avro::{Primitive, Schema};
use crate::common::names::upper;
use crate::common::python::{bytes_literal, repr, string_literal};
use crate::error::{GeneratorError, Result};
use crate::generator::logical::logical_default;
use crate::generator::resolver::class_name;
use crate::generator::state::Context;

/// Render a field default as a Python expression valid for the field's type.
///
/// Unions take the rule of their first member. Lists and mappings are built
/// through `default_factory`, so instances never share one mutable default.
pub fn render_default(
    ctx: &mut Context<'_>,
    schema: &Schema,
    default: &Value,
    field_name: &str,
) -> Result<String> {
    let ambiguous = || GeneratorError::AmbiguousDefault {
        field: field_name.to_string(),
        type_name: schema.kind().to_string(),
        default: default.to_string(),
    };

    let literal = match (schema, default) {
        (Schema::Union(alternatives), _) => {
            let primary = alternatives.first().ok_or_else(ambiguous)?;
            return render_default(ctx, primary, default, field_name);
        }
        (Schema::Reference(reference), _) => {
            let named_types = ctx.named_types;
            let definition = named_types.get(&reference.fullname).ok_or_else(ambiguous)?;
            return render_default(ctx, definition, default, field_name);
        }
        (Schema::Primitive(Primitive::Null), Value::Null) => Some("None".to_string()),
        (Schema::Primitive(Primitive::Boolean), Value::Bool(_)) => Some(repr(default)),
        (Schema::Primitive(Primitive::Int | Primitive::Long), Value::Number(n))
            if n.is_i64() || n.is_u64() =>
        {
            Some(n.to_string())
        }
        (Schema::Primitive(Primitive::Float | Primitive::Double), Value::Number(n)) => {
            Some(n.to_string())
        }
        (Schema::Primitive(Primitive::String), Value::String(s)) => Some(string_literal(s)),
        (Schema::Primitive(Primitive::Bytes) | Schema::Fixed(_), Value::String(s)) => {
            bytes_literal(s)
        }
        (Schema::Logical(logical), _) => logical_default(ctx, logical, default),
        (Schema::Enum(schema), Value::String(symbol)) if schema.symbols.contains(symbol) => {
            Some(format!("{}.{}", class_name(&schema.name), upper(symbol)))
        }
        (Schema::Array(_), Value::Array(items)) => {
            Some(factory_default(ctx, default, items.is_empty(), "list"))
        }
        (Schema::Map(_) | Schema::Record(_), Value::Object(entries)) => {
            Some(factory_default(ctx, default, entries.is_empty(), "dict"))
        }
        _ => None,
    };

    literal.ok_or_else(ambiguous)
}

fn factory_default(ctx: &mut Context<'_>, default: &Value, empty: bool, constructor: &str) -> String {
    let (factory, import) = ctx.generator.base_class.field_factory();
    ctx.state.add_import(import);
    if empty {
        format!("{factory}(default_factory={constructor})")
    } else {
        format!("{factory}(default_factory=lambda: {})", repr(default))
    }
}
