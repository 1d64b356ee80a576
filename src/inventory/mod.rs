//! Inventory: decoding, normalizing and filtering branch stock sheets.

pub mod codec;
mod filter;
pub mod normalize;
mod row;

pub use codec::{CalamineCodec, CellValue, DecodeError, RawRecord, SpreadsheetCodec};
pub use filter::filter_rows;
pub use normalize::normalize;
pub use row::{sample_table, total_units, InventoryRow, InventoryTable, DEFAULT_PRICE_ENQUIRY};

/// Decode a workbook and normalize its first sheet in one step.
pub fn parse_table<C: SpreadsheetCodec + ?Sized>(
    codec: &C,
    bytes: &[u8],
) -> Result<InventoryTable, DecodeError> {
    let records = codec.decode(bytes)?;
    Ok(normalize(&records))
}
