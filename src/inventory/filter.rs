use super::row::InventoryRow;

/// Rows matching a free-text query, in table order.
///
/// The trimmed query is compared case-insensitively as a substring of the
/// make, model, grading and quantity of each row; any one field matching is
/// enough. A blank query matches every row.
pub fn filter_rows<'a>(rows: &'a [InventoryRow], query: &str) -> Vec<&'a InventoryRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.iter().collect();
    }
    rows.iter().filter(|row| row_matches(row, &needle)).collect()
}

fn row_matches(row: &InventoryRow, needle: &str) -> bool {
    [&row.make, &row.model, &row.grading]
        .into_iter()
        .any(|field| field.to_lowercase().contains(needle))
        || row.quantity.to_string().contains(needle)
}
