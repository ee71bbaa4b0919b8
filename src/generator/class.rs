use crate::avro::{Field, RecordSchema};
use crate::common::python::{list_repr, string_literal};
use crate::error::Result;
use crate::generator::defaults::render_default;
use crate::generator::resolver::{class_name, resolve_type};
use crate::generator::state::Context;
use crate::generator::templates::{ClassTemplate, FieldTemplate, MetaTemplate};

/// Render one record as a Python class.
///
/// Enums and nested records found along the way go to the state's extras,
/// not into the returned text.
#[cfg_attr(feature = "trace", tracing::instrument(skip_all, fields(record = %schema.name)))]
pub fn render_record(ctx: &mut Context<'_>, schema: &RecordSchema) -> Result<String> {
    let name = class_name(&schema.name);

    ctx.state.begin_record(&name, &schema.fullname());
    let fields = ordered_fields(&schema.fields)
        .into_iter()
        .map(|field| render_field(ctx, field))
        .collect::<Result<Vec<_>>>();
    ctx.state.end_record();

    let generator = ctx.generator;
    Ok(ClassTemplate {
        decorator: generator.base_class.decorator(),
        name: &name,
        base_class: generator.base_class.class_name(),
        docstring: schema.doc.as_deref(),
        fields: fields?,
        meta: render_meta(schema),
        indent: &generator.indent,
    }
    .to_string())
}

/// Fields without a default and with a non-nullable type first, then the
/// rest; order within each group is kept. The input is left untouched.
pub fn ordered_fields(fields: &[Field]) -> Vec<&Field> {
    let (mandatory, optional): (Vec<&Field>, Vec<&Field>) =
        fields.iter().partition(|field| !field.is_optional());
    mandatory.into_iter().chain(optional).collect()
}

pub fn render_field(ctx: &mut Context<'_>, field: &Field) -> Result<FieldTemplate> {
    let type_hint = resolve_type(ctx, &field.schema)?;
    let default = field
        .default
        .as_ref()
        .map(|default| render_default(ctx, &field.schema, default, &field.name))
        .transpose()?;

    Ok(FieldTemplate {
        name: field.name.clone(),
        type_hint,
        default,
    })
}

/// `class Meta` carries `namespace` and `aliases`; `doc` is the docstring.
fn render_meta(schema: &RecordSchema) -> Option<MetaTemplate> {
    let mut properties = Vec::new();
    if let Some(namespace) = &schema.declared_namespace {
        properties.push(("namespace", string_literal(namespace)));
    }
    if !schema.aliases.is_empty() {
        properties.push(("aliases", list_repr(&schema.aliases)));
    }
    (!properties.is_empty()).then_some(MetaTemplate { properties })
}
