//! Decoder for `V2.0` text tables
//!
//! Layout after the preamble line:
//!
//! ```text
//! Default: <value>          (optional; the line itself is always present)
//! <header> <header> ...
//! <label> <cell> <cell> ...
//! ```
//!
//! Row labels are discarded: a row's position is its index.

use crate::preamble::Version;
use crate::stream::ByteStream;
use crate::table::{Row, Table};
use crate::tokenizer::{tokenize, TokenRules};
use std::io::{Read, Seek};

const DEFAULT_LABEL: &str = "Default:";

/// Decode the body of a `V2.0` table
pub(crate) fn decode<R: Read + Seek>(stream: &mut ByteStream<R>) -> Table {
    let default = read_default(stream);

    let mut headers = Vec::new();
    tokenize(stream, &mut headers, TokenRules::TEXT, 0, None);

    let rows = read_rows(stream, headers.len());

    Table::new(Version::Text, headers, rows, default)
}

fn read_default<R: Read + Seek>(stream: &mut ByteStream<R>) -> String {
    let mut tokens = Vec::with_capacity(2);
    tokenize(stream, &mut tokens, TokenRules::TEXT, 0, None);

    let mut tokens = tokens.into_iter();
    match (tokens.next(), tokens.next()) {
        (Some(label), Some(value)) if label == DEFAULT_LABEL => value,
        _ => String::new(),
    }
}

fn read_rows<R: Read + Seek>(stream: &mut ByteStream<R>, column_count: usize) -> Vec<Option<Row>> {
    let mut rows = Vec::new();

    while !stream.eos() {
        let mut row = Vec::with_capacity(column_count);
        if !tokenize(stream, &mut row, TokenRules::TEXT, 1, None) {
            break;
        }
        // Short rows are kept as they are
        rows.push(Some(row));
    }

    rows
}
