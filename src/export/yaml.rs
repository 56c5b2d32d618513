//! YAML export of a whole scope

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::export::json::FullExport;
use crate::models::{Ledger, Scope};

fn export_err(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Export(e.to_string())
}

/// Write the full export as YAML with a short comment header
pub fn export_full_yaml<W: Write>(ledger: &Ledger, scope: &Scope, mut writer: W) -> LedgerResult<()> {
    let export = FullExport::from_ledger(ledger, scope);

    writeln!(writer, "# Ledgerbook export ({})", export.scope).map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)
}
