use serde::{Deserialize, Serialize};

/// Default for the price-enquiry flag when a sheet does not carry one.
pub const DEFAULT_PRICE_ENQUIRY: &str = "Yes";

/// One line of stock, in canonical shape.
///
/// `make` and `model` are never empty; the normalizer drops records where
/// either would be.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub make: String,
    pub model: String,
    pub quantity: u64,
    /// Display label; empty when the sheet had no grading.
    pub grading: String,
    pub price_enquiry: String,
}

impl InventoryRow {
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        quantity: u64,
        grading: impl Into<String>,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            quantity,
            grading: grading.into(),
            price_enquiry: DEFAULT_PRICE_ENQUIRY.to_string(),
        }
    }
}

/// Ordered rows for one branch. Replaced wholesale on every load.
pub type InventoryTable = Vec<InventoryRow>;

/// Built-in table shown whenever a branch's real file is missing, empty or
/// unreadable.
pub fn sample_table() -> InventoryTable {
    [
        ("Fujitsu-1", "ARROWS - F04K", 100, "AU-C"),
        ("Fujitsu-1", "ARROWS-NX-F02H", 25, "AU-C"),
        ("Fujitsu-3", "ARROWS WE 2", 125, "AU-B"),
        ("Fujitsu-4", "ARROWS - F04K", 100, "AU-D"),
        ("Fujitsu-5", "ARROWS-NX-F02H", 300, "AU-A"),
        ("Fujitsu-6", "ARROWS WE 2", 142, "DND"),
        ("Google Pixel-1", "7a", 554, "DNA"),
        ("Google Pixel-2", "9Pro XL", 255, "DNB"),
        ("Apple-1", "iPhone 11", 300, "DNB"),
        ("Apple-2", "iPhone 14 Pro Max", 200, "DND"),
    ]
    .into_iter()
    .map(|(make, model, quantity, grading)| InventoryRow::new(make, model, quantity, grading))
    .collect()
}

/// Sum of quantities across a table, saturating at `u64::MAX`.
pub fn total_units(rows: &[InventoryRow]) -> u64 {
    rows.iter().fold(0u64, |total, row| total.saturating_add(row.quantity))
}
