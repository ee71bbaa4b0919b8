use serde::{Deserialize, Serialize};

/// The Python base class generated models inherit from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum BaseClass {
    /// `dataclasses_avroschema.AvroModel` dataclasses.
    #[default]
    AvroModel,
    /// Plain `pydantic.BaseModel`.
    BaseModel,
    /// `dataclasses_avroschema.avrodantic.AvroBaseModel`.
    AvroBaseModel,
}

impl BaseClass {
    pub fn class_name(self) -> &'static str {
        match self {
            BaseClass::AvroModel => "AvroModel",
            BaseClass::BaseModel => "BaseModel",
            BaseClass::AvroBaseModel => "AvroBaseModel",
        }
    }

    /// Imports every generated module starts with.
    pub fn imports(self) -> &'static [&'static str] {
        match self {
            BaseClass::AvroModel => &[
                "from dataclasses_avroschema import AvroModel",
                "import dataclasses",
            ],
            BaseClass::BaseModel => &["from pydantic import BaseModel"],
            BaseClass::AvroBaseModel => {
                &["from dataclasses_avroschema.avrodantic import AvroBaseModel"]
            }
        }
    }

    pub fn decorator(self) -> Option<&'static str> {
        match self {
            BaseClass::AvroModel => Some("@dataclasses.dataclass"),
            BaseClass::BaseModel | BaseClass::AvroBaseModel => None,
        }
    }

    /// Callable wrapping `default_factory=...` defaults, with its import.
    pub fn field_factory(self) -> (&'static str, &'static str) {
        match self {
            BaseClass::AvroModel => ("dataclasses.field", "import dataclasses"),
            BaseClass::BaseModel | BaseClass::AvroBaseModel => {
                ("Field", "from pydantic import Field")
            }
        }
    }

    /// Whether the `dataclasses_avroschema.types` helpers are available.
    pub fn has_avro_types(self) -> bool {
        matches!(self, BaseClass::AvroModel | BaseClass::AvroBaseModel)
    }

    pub fn condecimal_import(self) -> &'static str {
        match self {
            BaseClass::AvroModel => "from dataclasses_avroschema.types import condecimal",
            BaseClass::BaseModel | BaseClass::AvroBaseModel => "from pydantic import condecimal",
        }
    }
}
