//! Row normalization: raw decoded records into canonical [`InventoryRow`]s.
//!
//! Sheets arrive with whatever headers the uploader typed. Each canonical
//! field has an ordered list of accepted labels; the first label holding a
//! present value wins, otherwise the field's default applies. Records left
//! without a make or model are dropped.

use super::codec::{CellValue, RawRecord};
use super::row::{InventoryRow, InventoryTable, DEFAULT_PRICE_ENQUIRY};

pub const MAKE_LABELS: &[&str] = &["Make", "make"];
pub const MODEL_LABELS: &[&str] = &["Model", "model"];
pub const QUANTITY_LABELS: &[&str] = &["Quantity", "quantity"];
pub const GRADING_LABELS: &[&str] = &["Grading", "grading"];
pub const PRICE_ENQUIRY_LABELS: &[&str] = &["Price Enquiry", "priceEnquiry"];

/// Normalize records in order, dropping the invalid ones.
pub fn normalize(records: &[RawRecord]) -> InventoryTable {
    records.iter().filter_map(normalize_record).collect()
}

/// Normalize a single record. `None` if make or model is missing.
pub fn normalize_record(record: &RawRecord) -> Option<InventoryRow> {
    let make = text_field(record, MAKE_LABELS);
    let model = text_field(record, MODEL_LABELS);
    if make.is_empty() || model.is_empty() {
        return None;
    }

    Some(InventoryRow {
        make,
        model,
        quantity: lookup(record, QUANTITY_LABELS).map_or(0, coerce_quantity),
        grading: text_field(record, GRADING_LABELS),
        price_enquiry: lookup(record, PRICE_ENQUIRY_LABELS)
            .map(|cell| cell.to_string().trim().to_string())
            .unwrap_or_else(|| DEFAULT_PRICE_ENQUIRY.to_string()),
    })
}

/// First present cell among `labels`, in order.
fn lookup<'a>(record: &'a RawRecord, labels: &[&str]) -> Option<&'a CellValue> {
    labels
        .iter()
        .filter_map(|label| record.get(label))
        .find(|cell| cell.is_present())
}

fn text_field(record: &RawRecord, labels: &[&str]) -> String {
    lookup(record, labels)
        .map(|cell| cell.to_string().trim().to_string())
        .unwrap_or_default()
}

/// Coerce a cell to a non-negative whole quantity. Anything that is not a
/// positive finite number becomes 0.
pub fn coerce_quantity(cell: &CellValue) -> u64 {
    let n = match cell {
        CellValue::Number(n) => *n,
        CellValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        CellValue::Empty | CellValue::Bool(_) => 0.0,
    };
    if n.is_finite() && n > 0.0 {
        n.floor() as u64
    } else {
        0
    }
}
