//! Error types for schema validation and model generation.

/// Error returned by [`validate_schema`](crate::validation::validate_schema).
///
/// Every variant carries the path of the offending node, e.g. `User.fields[2].type`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// The top-level node is not a record.
    #[error("{path}: expected a record schema, found {found}")]
    NotARecord { path: String, found: String },

    /// A key required by the node's kind is absent.
    #[error("{path}: '{kind}' schema is missing required key '{key}'")]
    MissingKey {
        path: String,
        kind: String,
        key: &'static str,
    },

    /// A key is present but holds a value of the wrong shape.
    #[error("{path}: invalid '{key}': {detail}")]
    InvalidValue {
        path: String,
        key: &'static str,
        detail: String,
    },

    /// A name, namespace or symbol does not match `[A-Za-z_][A-Za-z0-9_]*`.
    #[error("{path}: invalid name '{name}'")]
    InvalidName { path: String, name: String },

    /// A type token is neither a primitive nor a previously defined named type.
    #[error("{path}: unknown type '{token}'")]
    UnknownType { path: String, token: String },

    /// A named type, field or symbol is defined twice.
    #[error("{path}: duplicate {what} '{name}'")]
    DuplicateName {
        path: String,
        what: &'static str,
        name: String,
    },

    /// A union is empty, nests another union, or repeats a member kind.
    #[error("{path}: invalid union: {detail}")]
    InvalidUnion { path: String, detail: String },
}

/// Error returned by the generator entry points.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("schema validation failed: {0}")]
    Schema(#[from] SchemaError),

    /// A default value whose JSON shape cannot be rendered for the field type.
    #[error("field '{field}': cannot render default {default} for type '{type_name}'")]
    AmbiguousDefault {
        field: String,
        type_name: String,
        default: String,
    },

    /// Two different definitions would produce the same Python class name.
    #[error("type name collision: '{name}' is defined twice with different contents")]
    NameCollision { name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;
