//! Export module for Ledgerbook
//!
//! - CSV: the entries of the current filtered view, spreadsheet-compatible
//! - JSON/YAML: every book and entry of a scope

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_view_csv, CSV_HEADER};
pub use self::json::{export_full_json, ExportMetadata, FullExport, EXPORT_SCHEMA_VERSION};
pub use self::yaml::export_full_yaml;
