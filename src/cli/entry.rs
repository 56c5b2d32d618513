//! Entry CLI commands

use clap::Subcommand;

use super::{parse_kind, resolve_book, ViewArgs};
use crate::config::Settings;
use crate::display::{format_entry_details, format_entry_table};
use crate::error::{LedgerError, LedgerResult};
use crate::models::entry::parse_amount;
use crate::models::{EntryId, EntryKind};
use crate::services::LedgerService;
use crate::storage::PersistenceProvider;

/// Entry subcommands
#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// Record an entry dated today
    Add {
        /// What the money was for
        description: String,
        /// Amount, e.g. "12.50"; the kind carries the sign
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// income or expense
        #[arg(short, long, value_parser = parse_kind, default_value = "expense")]
        kind: EntryKind,
        /// Book to add to (defaults to the active book)
        #[arg(short, long)]
        book: Option<String>,
    },
    /// Change an entry's description, amount or kind
    Edit {
        /// Entry ID
        id: EntryId,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New kind
        #[arg(short, long, value_parser = parse_kind)]
        kind: Option<EntryKind>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID
        id: EntryId,
    },
    /// List entries of a book, newest first
    List {
        #[command(flatten)]
        view: ViewArgs,
    },
}

/// Handle an entry command
pub fn handle_entry_command<P: PersistenceProvider>(
    service: &mut LedgerService<P>,
    settings: &Settings,
    cmd: EntryCommands,
) -> LedgerResult<()> {
    match cmd {
        EntryCommands::Add {
            description,
            amount,
            kind,
            book,
        } => {
            let amount = parse_amount(&amount)?;
            let book = resolve_book(book.as_deref(), service);
            let entry = service.add_entry(&book, &description, amount, kind)?;

            println!("Added entry {} to {}", entry.id, entry.book_name);
            print!("{}", format_entry_details(&entry, &settings.currency_symbol));
        }

        EntryCommands::Edit {
            id,
            description,
            amount,
            kind,
        } => {
            if description.is_none() && amount.is_none() && kind.is_none() {
                println!("No changes specified. Use --description, --amount or --kind.");
                return Ok(());
            }

            let current = service
                .ledger()
                .entry(id)
                .cloned()
                .ok_or_else(|| LedgerError::entry_not_found(id.to_string()))?;

            let amount = match amount {
                Some(a) => parse_amount(&a)?,
                None => current.amount,
            };
            let description = description.unwrap_or(current.description);
            let kind = kind.unwrap_or(current.kind);

            let updated = service.update_entry(id, &description, amount, kind)?;
            println!("Updated entry {}", updated.id);
            print!("{}", format_entry_details(&updated, &settings.currency_symbol));
        }

        EntryCommands::Delete { id } => {
            let removed = service.delete_entry(id)?;
            println!(
                "Deleted entry {} ({}) from {}",
                removed.id, removed.description, removed.book_name
            );
        }

        EntryCommands::List { view } => {
            let selection = view.selection(service);
            let entries = service.filtered_view(&selection);
            println!(
                "{}: {} {} ({})",
                selection.book, selection.month, selection.year, selection.kind
            );
            println!("{}", format_entry_table(&entries, &settings.currency_symbol));
        }
    }

    Ok(())
}
