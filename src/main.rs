use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ledgerbook::audit::AuditLogger;
use ledgerbook::cli::{
    handle_book_command, handle_entry_command, handle_export_command, handle_summary_command,
    handle_years_command, BookCommands, EntryCommands, ExportCommands, ViewArgs,
};
use ledgerbook::config::{logging, LedgerPaths, Settings};
use ledgerbook::models::{Scope, SystemClock};
use ledgerbook::services::LedgerService;
use ledgerbook::storage::JsonFileProvider;

#[derive(Parser)]
#[command(
    name = "ledgerbook",
    version,
    about = "Multi-book income and expense ledger",
    long_about = "Ledgerbook keeps income and expense entries in named books, \
                  filters them by month, year and kind, and keeps a running \
                  balance for each book."
)]
struct Cli {
    /// User id whose books to use (local device books when omitted)
    #[arg(short, long, global = true, env = "LEDGERBOOK_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Book management commands
    #[command(subcommand)]
    Book(BookCommands),

    /// Entry management commands
    #[command(subcommand)]
    Entry(EntryCommands),

    /// Show income, expense and balance
    Summary {
        #[command(flatten)]
        view: ViewArgs,
    },

    /// List the years that can be selected
    Years {
        /// Book (defaults to the active book)
        #[arg(short, long)]
        book: Option<String>,
    },

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Create the data directory and default book
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    logging::init(&settings.log_level);

    let scope = Scope::from_user(cli.user.as_deref());

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("Ledgerbook - multi-book income and expense ledger");
            println!();
            println!("Run 'ledgerbook --help' for usage information.");
            return Ok(());
        }
    };

    if let Commands::Config = command {
        println!("Ledgerbook Configuration");
        println!("========================");
        println!("Base directory: {}", paths.base_dir().display());
        println!("Ledger file:    {}", paths.ledger_file(&scope).display());
        println!("Audit log:      {}", paths.audit_log().display());
        println!("Scope:          {}", scope);
        println!();
        println!("Settings:");
        println!("  Default book:  {}", settings.default_book_name);
        println!("  Currency:      {}", settings.currency_symbol);
        println!("  Date format:   {}", settings.date_format);
        println!("  Audit enabled: {}", settings.audit_enabled);
        println!("  Log level:     {}", settings.log_level);
        return Ok(());
    }

    let provider = JsonFileProvider::for_scope(&paths, &scope);
    let mut service = LedgerService::open(provider, &settings, Arc::new(SystemClock))?;
    if settings.audit_enabled {
        service = service.with_audit(AuditLogger::new(paths.audit_log()));
    }

    match command {
        Commands::Book(cmd) => handle_book_command(&mut service, cmd)?,
        Commands::Entry(cmd) => handle_entry_command(&mut service, &settings, cmd)?,
        Commands::Summary { view } => handle_summary_command(&service, &settings, &view)?,
        Commands::Years { book } => handle_years_command(&service, book.as_deref())?,
        Commands::Export(cmd) => handle_export_command(&service, &scope, cmd)?,
        Commands::Init => {
            paths.ensure_directories()?;
            if !paths.is_initialized() {
                settings.save(&paths)?;
            }
            println!("Initialized Ledgerbook at: {}", paths.base_dir().display());
            println!("Books for {}:", scope);
            for name in service.book_names() {
                println!("  - {}", name);
            }
        }
        Commands::Config => {}
    }

    Ok(())
}
