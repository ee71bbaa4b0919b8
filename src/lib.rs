//! # avro2model
//!
//! Generate Python model classes from [Apache Avro](https://avro.apache.org/)
//! record schemas.
//!
//! ## Features
//!
//! - Validates the schema before generating anything
//! - Maps primitives, logical types, unions, arrays, maps, fixed, enums and
//!   nested records to Python type hints
//! - Targets `dataclasses_avroschema.AvroModel` dataclasses, pydantic
//!   `BaseModel` or `AvroBaseModel`
//! - Renders defaults as valid Python literals (enum members, `datetime`,
//!   `decimal.Decimal`, `default_factory` for collections)
//! - Orders fields so that defaulted and nullable fields come last
//!
//! ## Example (Programmatic Usage)
//!
//! ```
//! use serde_json::json;
//! use avro2model::render_module;
//!
//! let schema = json!({
//!     "type": "record",
//!     "name": "User",
//!     "fields": [
//!         {"name": "name", "type": "string"},
//!         {"name": "age", "type": ["null", "long"], "default": null}
//!     ]
//! });
//!
//! let module = render_module(&[schema]).unwrap();
//! assert!(module.contains("class User(AvroModel):"));
//! assert!(module.contains("age: typing.Optional[int] = None"));
//! ```
//!
//! ## Example (CLI)
//!
//! ```bash
//! avro2model user.avsc models.py --base-class base-model
//! ```
//!
//! ## Crate Layout
//!
//! - [`avro`]: Validated schema tree (`Schema`, `RecordSchema`, `Field`)
//! - [`validation`]: JSON → schema tree, rejecting malformed schemas
//! - [`generator`]: Type resolution, default rendering and class rendering
//! - [`common`]: Naming and Python literal helpers
//! - [`error`]: `SchemaError` and `GeneratorError`
//!
//! The CLI binary is enabled with the `cli` feature.
pub mod avro;
pub mod common;
pub mod error;
pub mod generator;
pub mod validation;

pub use error::{GeneratorError, SchemaError};
pub use generator::{BaseClass, ModelGenerator, convert_avsc_to_python, render_module};
pub use validation::validate_schema;
