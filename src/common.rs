pub mod names;
pub mod python;

pub use names::*;
pub use python::*;
