//! Entry points for loading 2DA tables

use crate::binary;
use crate::error::{Error, Result};
use crate::preamble::{read_preamble, Version};
use crate::stream::ByteStream;
use crate::table::Table;
use crate::text;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::{debug, warn};

/// Decode a 2DA from a seekable reader.
///
/// The reader is used exclusively for the whole pass. Any failure, including
/// a read error reported by the reader partway through, discards the table.
pub fn load<R: Read + Seek>(reader: R) -> Result<Table> {
    let mut stream = ByteStream::new(reader)?;

    match decode(&mut stream) {
        Ok(table) => {
            debug!(
                version = %table.version(),
                rows = table.row_count(),
                columns = table.column_count(),
                "decoded 2DA table"
            );
            Ok(table)
        }
        Err(e) => {
            warn!(error = %e, "failed to load 2DA table");
            Err(e)
        }
    }
}

/// Decode a 2DA held in memory
pub fn load_bytes(bytes: &[u8]) -> Result<Table> {
    load(Cursor::new(bytes))
}

/// Open and decode a 2DA file
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    load(file)
}

fn decode<R: Read + Seek>(stream: &mut ByteStream<R>) -> Result<Table> {
    let version = read_preamble(stream)?;

    let table = match version {
        Version::Text => text::decode(stream),
        Version::Binary => binary::decode(stream)?,
    };

    if let Some(source) = stream.take_error() {
        return Err(Error::StreamRead {
            message: format!("stream reported an error while decoding {version} data"),
            source: Some(source),
        });
    }

    Ok(table)
}
