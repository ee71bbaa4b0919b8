use crate::avro::{LogicalType, Primitive};
use crate::generator::base_class::BaseClass;

pub const TYPING_IMPORT: &str = "import typing";
pub const ENUM_IMPORT: &str = "import enum";
pub const DATETIME_IMPORT: &str = "import datetime";
pub const DECIMAL_IMPORT: &str = "import decimal";
pub const UUID_IMPORT: &str = "import uuid";
pub const AVRO_TYPES_IMPORT: &str = "from dataclasses_avroschema import types";

/// A Python type expression and the import it needs, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythonType {
    pub expr: &'static str,
    pub import: Option<&'static str>,
}

const fn plain(expr: &'static str) -> PythonType {
    PythonType { expr, import: None }
}

const fn imported(expr: &'static str, import: &'static str) -> PythonType {
    PythonType {
        expr,
        import: Some(import),
    }
}

/// Map an Avro primitive to its Python type.
///
/// `int` and `float` use the 32-bit wrappers from `dataclasses_avroschema`
/// when the base class provides them, so the schema round-trips.
pub fn primitive_type(base_class: BaseClass, primitive: Primitive) -> PythonType {
    let avro_types = base_class.has_avro_types();
    match primitive {
        Primitive::Null => plain("None"),
        Primitive::Boolean => plain("bool"),
        Primitive::Int if avro_types => imported("types.Int32", AVRO_TYPES_IMPORT),
        Primitive::Int | Primitive::Long => plain("int"),
        Primitive::Float if avro_types => imported("types.Float32", AVRO_TYPES_IMPORT),
        Primitive::Float | Primitive::Double => plain("float"),
        Primitive::Bytes => plain("bytes"),
        Primitive::String => plain("str"),
    }
}

/// Map a logical type to its Python type.
///
/// For `decimal` this is the bare `condecimal` constructor; the caller adds
/// the precision and scale arguments.
pub fn logical_type(base_class: BaseClass, logical: &LogicalType) -> PythonType {
    let avro_types = base_class.has_avro_types();
    match logical {
        LogicalType::Decimal { .. } => imported("condecimal", base_class.condecimal_import()),
        LogicalType::Uuid => imported("uuid.UUID", UUID_IMPORT),
        LogicalType::Date => imported("datetime.date", DATETIME_IMPORT),
        LogicalType::TimeMillis => imported("datetime.time", DATETIME_IMPORT),
        LogicalType::TimeMicros if avro_types => imported("types.TimeMicro", AVRO_TYPES_IMPORT),
        LogicalType::TimeMicros => imported("datetime.time", DATETIME_IMPORT),
        LogicalType::TimestampMillis => imported("datetime.datetime", DATETIME_IMPORT),
        LogicalType::TimestampMicros if avro_types => {
            imported("types.DateTimeMicro", AVRO_TYPES_IMPORT)
        }
        LogicalType::TimestampMicros => imported("datetime.datetime", DATETIME_IMPORT),
    }
}
