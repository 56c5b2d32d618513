//! Display formatting for terminal output

pub mod entry;
pub mod summary;

pub use entry::{format_entry_details, format_entry_table};
pub use summary::{format_book_list, format_totals, format_years};
