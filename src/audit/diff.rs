//! Change summaries for entry updates

use crate::models::Entry;

/// Describe which mutable fields differ between two versions of an entry
///
/// Returns `None` when nothing changed.
pub fn entry_diff(before: &Entry, after: &Entry) -> Option<String> {
    let mut changes = Vec::new();

    if before.description != after.description {
        changes.push(format!(
            "description: \"{}\" -> \"{}\"",
            before.description, after.description
        ));
    }
    if before.amount != after.amount {
        changes.push(format!(
            "amount: {} -> {}",
            before.amount.to_decimal_string(),
            after.amount.to_decimal_string()
        ));
    }
    if before.kind != after.kind {
        changes.push(format!("kind: {} -> {}", before.kind, after.kind));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}
