pub mod base_class;
pub mod class;
pub mod defaults;
pub mod logical;
pub mod resolver;
pub mod state;
pub mod templates;
pub mod types;

pub use base_class::BaseClass;
pub use state::GenerationState;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;

use crate::avro::{Schema, ValidatedSchema};
use crate::error::Result;
use crate::validation::validate_schemas;
use class::render_record;
use resolver::class_name;
use state::Context;
use templates::ModuleTemplate;

/// Generator configuration.
///
/// Holds no per-run state: every render call builds a fresh
/// [`GenerationState`], so one generator can serve concurrent callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelGenerator {
    pub base_class: BaseClass,
    /// Indentation of one block level in the generated code.
    pub indent: String,
}

impl Default for ModelGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelGenerator {
    /// Create a generator for `AvroModel` dataclasses with 4-space indentation.
    pub fn new() -> Self {
        Self {
            base_class: BaseClass::default(),
            indent: "    ".to_string(),
        }
    }

    pub fn with_base_class(mut self, base_class: BaseClass) -> Self {
        self.base_class = base_class;
        self
    }

    /// Render the Python module for a single record schema.
    pub fn render(&self, schema: &Value) -> Result<String> {
        self.render_module(std::slice::from_ref(schema))
    }

    /// Render one Python module holding a class per record schema.
    ///
    /// Every schema is validated before anything is rendered; the first
    /// invalid one aborts the call.
    #[cfg_attr(feature = "trace", tracing::instrument(skip_all, fields(schemas = schemas.len())))]
    pub fn render_module(&self, schemas: &[Value]) -> Result<String> {
        let validated = validate_schemas(schemas)?;

        let mut state = GenerationState::new(self);
        let classes = validated
            .iter()
            .filter_map(|schema| self.render_top_level(&mut state, schema).transpose())
            .collect::<Result<Vec<_>>>()?;

        Ok(ModuleTemplate {
            imports: &state.imports,
            extras: &state.extras,
            classes: &classes,
        }
        .to_string())
    }

    /// Render one top-level class, or nothing when an identical class of the
    /// same name is already in the module.
    fn render_top_level(
        &self,
        state: &mut GenerationState,
        schema: &ValidatedSchema,
    ) -> Result<Option<String>> {
        let name = class_name(&schema.root.name);
        let definition = Schema::Record(schema.root.clone());
        if state.is_emitted(&name, &definition)? {
            tracing::debug!(class = %name, "class already defined");
            return Ok(None);
        }

        let mut ctx = Context {
            generator: self,
            named_types: &schema.named_types,
            state,
        };
        let text = render_record(&mut ctx, &schema.root)?;
        ctx.state.emit_class(&name, &definition)?;
        Ok(Some(text))
    }
}

/// Render a module with the default configuration.
pub fn render_module(schemas: &[Value]) -> Result<String> {
    ModelGenerator::new().render_module(schemas)
}

/// Convert an `.avsc` file into a Python module file.
///
/// The file holds either one record schema or a list of them.
pub fn convert_avsc_to_python(
    avro_schema_path: &str,
    python_path: &str,
    base_class: BaseClass,
) -> Result<()> {
    let content = fs::read_to_string(avro_schema_path)?;
    let schema: Value = serde_json::from_str(&content)?;

    let generator = ModelGenerator::new().with_base_class(base_class);
    let module = match schema {
        Value::Array(schemas) => generator.render_module(&schemas)?,
        single => generator.render(&single)?,
    };

    fs::write(python_path, module)?;
    tracing::info!(input = avro_schema_path, output = python_path, "wrote python module");
    Ok(())
}
