//! Export of one owner's data
//!
//! - CSV: expenses only, for spreadsheets
//! - JSON: full machine-readable export with schema version
//! - YAML: the same document, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_expenses_csv;
pub use json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
