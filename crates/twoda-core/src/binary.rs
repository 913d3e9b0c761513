//! Decoder for `V2.b` binary tables
//!
//! Layout after the preamble line:
//!
//! ```text
//! header\theader\t...\0         column names
//! u32 LE                         row count
//! label\tlabel\t...              one label per row, discarded
//! u16 LE * rows * columns        cell offsets, row-major
//! u16                            reserved
//! string pool                    NUL-terminated cells, addressed by the offsets
//! ```
//!
//! Offsets are relative to the start of the pool. They are neither monotonic
//! nor row-local, and several cells may share one pool entry.

use crate::error::{Error, Result};
use crate::preamble::Version;
use crate::stream::ByteStream;
use crate::table::{Row, Table};
use crate::tokenizer::{next_token, tokenize, TokenRules};
use std::io::{Read, Seek};

/// Decode the body of a `V2.b` table
pub(crate) fn decode<R: Read + Seek>(stream: &mut ByteStream<R>) -> Result<Table> {
    let mut headers = Vec::new();
    tokenize(stream, &mut headers, TokenRules::BINARY_HEADERS, 0, None);
    let column_count = headers.len();

    let row_count = skip_row_names(stream)?;
    let mut rows: Vec<Option<Row>> = vec![None; row_count];

    let offsets = read_offsets(stream, row_count, column_count)?;
    stream.skip(2); // Reserved

    let data_offset = stream.pos();

    for (r, slot) in rows.iter_mut().enumerate() {
        let mut row = Vec::with_capacity(column_count);
        for c in 0..column_count {
            let offset = data_offset + u64::from(offsets[r * column_count + c]);
            stream.seek(offset)?;

            let cell = next_token(stream, TokenRules::BINARY_CELL)
                .map(|token| token.text)
                .unwrap_or_default();
            row.push(cell);
        }
        *slot = Some(row);
    }

    Ok(Table::new(Version::Binary, headers, rows, String::new()))
}

/// Read the row count and step over the row labels
fn skip_row_names<R: Read + Seek>(stream: &mut ByteStream<R>) -> Result<usize> {
    let row_count = stream.read_u32_le();

    // Every label takes at least one byte
    if u64::from(row_count) > stream.remaining() {
        return Err(Error::truncated(format!(
            "{row_count} rows declared but only {} bytes remain",
            stream.remaining()
        )));
    }
    let row_count = usize::try_from(row_count)
        .map_err(|_| Error::truncated(format!("row count {row_count} does not fit in memory")))?;

    let mut names = Vec::with_capacity(row_count);
    tokenize(stream, &mut names, TokenRules::BINARY_ROW_NAMES, 0, Some(row_count));

    Ok(row_count)
}

fn read_offsets<R: Read + Seek>(
    stream: &mut ByteStream<R>,
    row_count: usize,
    column_count: usize,
) -> Result<Vec<u16>> {
    let cell_count = row_count
        .checked_mul(column_count)
        .filter(|&n| (n as u64).saturating_mul(2) <= stream.remaining())
        .ok_or_else(|| {
            Error::truncated(format!(
                "offset grid of {row_count}x{column_count} cells does not fit in the {} remaining bytes",
                stream.remaining()
            ))
        })?;

    Ok((0..cell_count).map(|_| stream.read_u16_le()).collect())
}
