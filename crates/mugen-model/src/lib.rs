pub mod diagnostic;
pub mod error;
pub mod lookup;
pub mod schema;

pub use diagnostic::{Diagnostic, DiagnosticReport, Severity};
pub use error::{ModelError, Result};
pub use lookup::CaseInsensitiveMap;
pub use schema::{PropType, SchemaSection, ValidController, ValidProperty};
