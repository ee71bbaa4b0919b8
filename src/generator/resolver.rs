//! Avro type → Python type expression.
//!
//! Resolution may register imports and emit auxiliary definitions (enums,
//! nested classes) into the generation state as a side effect.
use crate::avro::{
    EnumSchema, FixedSchema, LogicalSchema, LogicalType, Primitive, RecordSchema, Reference,
    Schema, short_name,
};
use crate::common::names::{pascal, upper};
use crate::common::python::{list_repr, string_literal};
use crate::error::{Result, SchemaError};
use crate::generator::class::render_record;
use crate::generator::state::Context;
use crate::generator::templates::EnumTemplate;
use crate::generator::types::{
    AVRO_TYPES_IMPORT, ENUM_IMPORT, PythonType, TYPING_IMPORT, logical_type, primitive_type,
};

/// Python class name for an Avro type name (full or short).
pub fn class_name(avro_name: &str) -> String {
    pascal(short_name(avro_name))
}

/// A quoted forward reference, for classes not yet defined where they are used.
pub fn forward_ref(class_name: &str) -> String {
    format!("\"{class_name}\"")
}

pub fn resolve_type(ctx: &mut Context<'_>, schema: &Schema) -> Result<String> {
    match schema {
        Schema::Primitive(primitive) => {
            let mapped = primitive_type(ctx.generator.base_class, *primitive);
            Ok(use_type(ctx, mapped))
        }
        Schema::Logical(logical) => Ok(resolve_logical(ctx, logical)),
        Schema::Union(alternatives) => resolve_union(ctx, alternatives),
        Schema::Array(items) => {
            ctx.state.add_import(TYPING_IMPORT);
            let items = resolve_type(ctx, items)?;
            Ok(format!("typing.List[{items}]"))
        }
        Schema::Map(values) => {
            ctx.state.add_import(TYPING_IMPORT);
            let values = resolve_type(ctx, values)?;
            Ok(format!("typing.Dict[str, {values}]"))
        }
        Schema::Enum(schema) => resolve_enum(ctx, schema),
        Schema::Fixed(schema) => Ok(resolve_fixed(ctx, schema)),
        Schema::Record(schema) => resolve_record(ctx, schema),
        Schema::Reference(reference) => resolve_reference(ctx, reference),
    }
}

fn use_type(ctx: &mut Context<'_>, mapped: PythonType) -> String {
    if let Some(import) = mapped.import {
        ctx.state.add_import(import);
    }
    mapped.expr.to_string()
}

fn resolve_logical(ctx: &mut Context<'_>, logical: &LogicalSchema) -> String {
    let mapped = logical_type(ctx.generator.base_class, &logical.logical_type);
    let expr = use_type(ctx, mapped);
    match logical.logical_type {
        LogicalType::Decimal { precision, scale } => {
            format!("{expr}(max_digits={precision}, decimal_places={scale})")
        }
        _ => expr,
    }
}

/// `[null, T]` / `[T, null]` is `Optional[T]`; anything wider is a `Union`
/// rendered in schema order.
fn resolve_union(ctx: &mut Context<'_>, alternatives: &[Schema]) -> Result<String> {
    let is_null = |schema: &Schema| matches!(schema, Schema::Primitive(Primitive::Null));
    match alternatives {
        [single] => resolve_type(ctx, single),
        [first, second] if is_null(first) || is_null(second) => {
            let payload = if is_null(first) { second } else { first };
            ctx.state.add_import(TYPING_IMPORT);
            let payload = resolve_type(ctx, payload)?;
            Ok(format!("typing.Optional[{payload}]"))
        }
        _ => {
            ctx.state.add_import(TYPING_IMPORT);
            let members = alternatives
                .iter()
                .map(|alternative| resolve_type(ctx, alternative))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("typing.Union[{}]", members.join(", ")))
        }
    }
}

fn resolve_enum(ctx: &mut Context<'_>, schema: &EnumSchema) -> Result<String> {
    let name = class_name(&schema.name);
    let definition = Schema::Enum(schema.clone());
    if ctx.state.is_emitted(&name, &definition)? {
        return Ok(name);
    }

    ctx.state.add_import(ENUM_IMPORT);
    let text = EnumTemplate {
        name: &name,
        docstring: schema.doc.as_deref(),
        symbols: schema
            .symbols
            .iter()
            .map(|symbol| (upper(symbol), string_literal(symbol)))
            .collect(),
        indent: &ctx.generator.indent,
    }
    .to_string();
    ctx.state.emit_extra(&name, &definition, text)?;
    Ok(name)
}

fn resolve_fixed(ctx: &mut Context<'_>, schema: &FixedSchema) -> String {
    if !ctx.generator.base_class.has_avro_types() {
        return "bytes".to_string();
    }

    ctx.state.add_import(AVRO_TYPES_IMPORT);
    let mut properties = format!("size={}", schema.size);
    if let Some(namespace) = &schema.declared_namespace {
        properties.push_str(&format!(", namespace={}", string_literal(namespace)));
    }
    if !schema.aliases.is_empty() {
        properties.push_str(&format!(", aliases={}", list_repr(&schema.aliases)));
    }
    format!("types.confixed({properties})")
}

/// Render a nested record as an auxiliary class and refer to it by name.
fn resolve_record(ctx: &mut Context<'_>, schema: &RecordSchema) -> Result<String> {
    let name = class_name(&schema.name);
    if ctx.state.is_in_progress(&name, &schema.fullname())? {
        return Ok(forward_ref(&name));
    }

    let definition = Schema::Record(schema.clone());
    if ctx.state.is_emitted(&name, &definition)? {
        return Ok(visible_name(ctx, &name));
    }

    let text = render_record(ctx, schema)?;
    ctx.state.emit_extra(&name, &definition, text)?;
    Ok(name)
}

/// Named types used by name. A record that is not emitted yet is hoisted:
/// its definition is rendered right here.
fn resolve_reference(ctx: &mut Context<'_>, reference: &Reference) -> Result<String> {
    let named_types = ctx.named_types;
    let definition =
        named_types
            .get(&reference.fullname)
            .ok_or_else(|| SchemaError::UnknownType {
                path: reference.name().to_string(),
                token: reference.fullname.clone(),
            })?;
    resolve_type(ctx, definition)
}

fn visible_name(ctx: &Context<'_>, name: &str) -> String {
    if ctx.state.is_visible(name) {
        name.to_string()
    } else {
        forward_ref(name)
    }
}
