//! Book CLI commands

use clap::Subcommand;

use crate::display::format_book_list;
use crate::error::LedgerResult;
use crate::models::RenameOutcome;
use crate::services::LedgerService;
use crate::storage::PersistenceProvider;

/// Book subcommands
#[derive(Subcommand, Debug)]
pub enum BookCommands {
    /// Create an empty book and switch to it
    Create {
        /// Book name
        name: String,
    },
    /// Rename a book; its entries move with it
    Rename {
        /// Current name
        old_name: String,
        /// New name
        new_name: String,
    },
    /// List books with entry counts
    List,
    /// Switch the active book
    Use {
        /// Book name
        name: String,
    },
}

/// Handle a book command
pub fn handle_book_command<P: PersistenceProvider>(
    service: &mut LedgerService<P>,
    cmd: BookCommands,
) -> LedgerResult<()> {
    match cmd {
        BookCommands::Create { name } => {
            let book = service.create_book(&name)?;
            println!("Created book: {}", book.name);
        }

        BookCommands::Rename { old_name, new_name } => {
            match service.rename_book(&old_name, &new_name)? {
                RenameOutcome::Unchanged => {
                    println!("Book '{}' already has that name.", old_name);
                }
                RenameOutcome::Renamed { relabeled } => {
                    println!(
                        "Renamed book: {} -> {} ({} entries)",
                        old_name,
                        new_name.trim(),
                        relabeled
                    );
                }
            }
        }

        BookCommands::List => {
            let ledger = service.ledger();
            let books: Vec<(&str, usize)> = ledger
                .books()
                .iter()
                .map(|b| (b.name.as_str(), b.len()))
                .collect();
            print!("{}", format_book_list(&books, ledger.active_book()));
        }

        BookCommands::Use { name } => {
            service.select_book(&name)?;
            println!("Active book: {}", name);
        }
    }

    Ok(())
}
