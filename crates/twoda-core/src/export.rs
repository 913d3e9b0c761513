//! Flat views of a loaded table for inspection tools
//!
//! These write what was decoded, `****` markers included. They are meant for
//! viewing and diffing, not for producing 2DA files.

use crate::error::Result;
use crate::table::Table;
use std::io::Write;

/// Write the table as CSV: one header record, then one record per row slot.
/// Short rows are padded with empty fields; unfilled slots become empty records.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);

    csv_writer.write_record(table.headers())?;

    let width = table.column_count();
    for row in table.rows() {
        let cells = row.unwrap_or_default();
        let padding = width.saturating_sub(cells.len());
        let record = cells
            .iter()
            .map(String::as_str)
            .chain(std::iter::repeat("").take(padding));
        csv_writer.write_record(record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Render the table as pretty-printed JSON
pub fn to_json(table: &Table) -> Result<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

/// Write the table as pretty-printed JSON
pub fn write_json<W: Write>(table: &Table, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}
