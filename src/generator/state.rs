use std::collections::{BTreeSet, HashMap};

use crate::avro::Schema;
use crate::error::{GeneratorError, Result};
use crate::generator::ModelGenerator;

/// Where an emitted definition ends up in the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The auxiliary block, which precedes every class.
    Extra,
    /// The top-level classes, in input order.
    Class,
}

#[derive(Debug, Clone)]
struct Emitted {
    definition: Schema,
    placement: Placement,
}

/// Accumulator for one generation run.
///
/// Created fresh by every [`ModelGenerator::render_module`] call and dropped
/// once the module text is assembled.
#[derive(Debug, Default)]
pub struct GenerationState {
    pub imports: BTreeSet<String>,
    /// Rendered enums and nested classes, in discovery order.
    pub extras: Vec<String>,
    emitted: HashMap<String, Emitted>,
    /// `(class name, full name)` of the records being rendered, outermost first.
    in_progress: Vec<(String, String)>,
}

/// What every resolver call threads through the walk: the configuration,
/// the named types of the schema being rendered, and the run's state.
pub struct Context<'a> {
    pub generator: &'a ModelGenerator,
    pub named_types: &'a HashMap<String, Schema>,
    pub state: &'a mut GenerationState,
}

impl GenerationState {
    pub fn new(generator: &ModelGenerator) -> Self {
        let mut state = Self::default();
        for import in generator.base_class.imports() {
            state.add_import(import);
        }
        state
    }

    pub fn add_import(&mut self, import: &str) {
        if !self.imports.contains(import) {
            self.imports.insert(import.to_string());
        }
    }

    /// Whether `class_name` was already emitted from this exact definition.
    ///
    /// A different definition under the same name is a collision.
    pub fn is_emitted(&self, class_name: &str, definition: &Schema) -> Result<bool> {
        match self.emitted.get(class_name) {
            None => Ok(false),
            Some(existing) if existing.definition == *definition => Ok(true),
            Some(_) => Err(GeneratorError::NameCollision {
                name: class_name.to_string(),
            }),
        }
    }

    /// Append an auxiliary definition to `extras`, once per class name.
    pub fn emit_extra(&mut self, class_name: &str, definition: &Schema, text: String) -> Result<()> {
        if self.is_emitted(class_name, definition)? {
            return Ok(());
        }
        tracing::debug!(class = class_name, "emitted auxiliary definition");
        self.record(class_name, definition, Placement::Extra);
        self.extras.push(text);
        Ok(())
    }

    /// Register a top-level class; its text is kept by the caller.
    pub fn emit_class(&mut self, class_name: &str, definition: &Schema) -> Result<()> {
        if self.is_emitted(class_name, definition)? {
            return Ok(());
        }
        tracing::debug!(class = class_name, "rendered class");
        self.record(class_name, definition, Placement::Class);
        Ok(())
    }

    fn record(&mut self, class_name: &str, definition: &Schema, placement: Placement) {
        self.emitted.insert(
            class_name.to_string(),
            Emitted {
                definition: definition.clone(),
                placement,
            },
        );
    }

    pub fn begin_record(&mut self, class_name: &str, fullname: &str) {
        self.in_progress
            .push((class_name.to_string(), fullname.to_string()));
    }

    pub fn end_record(&mut self) {
        self.in_progress.pop();
    }

    /// Whether the record `fullname` is being rendered further up the walk.
    pub fn is_in_progress(&self, class_name: &str, fullname: &str) -> Result<bool> {
        match self.in_progress.iter().find(|(name, _)| name == class_name) {
            None => Ok(false),
            Some((_, full)) if full == fullname => Ok(true),
            Some(_) => Err(GeneratorError::NameCollision {
                name: class_name.to_string(),
            }),
        }
    }

    /// Whether an emitted class is already defined at the point where the
    /// record currently being rendered will be placed.
    pub fn is_visible(&self, class_name: &str) -> bool {
        match self.emitted.get(class_name).map(|e| e.placement) {
            Some(Placement::Extra) => true,
            // Only a top-level class body comes after other top-level classes.
            Some(Placement::Class) => self.in_progress.len() == 1,
            None => false,
        }
    }
}
