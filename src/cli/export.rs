//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Subcommand;

use super::ViewArgs;
use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_full_json, export_full_yaml, export_view_csv};
use crate::models::Scope;
use crate::services::LedgerService;
use crate::storage::PersistenceProvider;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the current filtered view to CSV
    Csv {
        #[command(flatten)]
        view: ViewArgs,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export every book and entry to JSON
    Json {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Export every book and entry to YAML
    Yaml {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn open_output(output: Option<&PathBuf>) -> LedgerResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn report(output: Option<&PathBuf>, what: &str) {
    if let Some(path) = output {
        eprintln!("Exported {} to {}", what, path.display());
    }
}

/// Handle export commands
pub fn handle_export_command<P: PersistenceProvider>(
    service: &LedgerService<P>,
    scope: &Scope,
    cmd: ExportCommands,
) -> LedgerResult<()> {
    match cmd {
        ExportCommands::Csv { view, output } => {
            let selection = view.selection(service);
            let entries = service.filtered_view(&selection);
            let rows = export_view_csv(entries, open_output(output.as_ref())?)?;
            report(output.as_ref(), &format!("{} entries", rows));
        }

        ExportCommands::Json { output, pretty } => {
            let mut writer = open_output(output.as_ref())?;
            export_full_json(service.ledger(), scope, &mut writer, pretty)?;
            writeln!(writer).map_err(|e| LedgerError::Export(e.to_string()))?;
            writer.flush().map_err(|e| LedgerError::Export(e.to_string()))?;
            report(output.as_ref(), &format!("scope {}", scope));
        }

        ExportCommands::Yaml { output } => {
            let mut writer = open_output(output.as_ref())?;
            export_full_yaml(service.ledger(), scope, &mut writer)?;
            writer.flush().map_err(|e| LedgerError::Export(e.to_string()))?;
            report(output.as_ref(), &format!("scope {}", scope));
        }
    }

    Ok(())
}
