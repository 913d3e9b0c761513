//! twoda-core: Decoder and typed query engine for BioWare 2DA tables
//!
//! This library provides functionality to:
//! - Decode `V2.0` text and `V2.b` binary 2DA files into one table model
//! - Look up cells as strings, integers or floats by row and column index
//!   or column name, with the table's default value filling in for missing
//!   cells and `****` reading as an explicitly empty cell
//! - Export a decoded table as CSV or JSON for inspection
//!
//! ```
//! let table = twoda_core::load_bytes(b"2DA V2.0\nDefault: 5\nName Cost\n0 Sword 15\n1 Dagger ****\n")?;
//! assert_eq!(table.cell_as_int_by_name(0, "Cost"), 15);
//! assert_eq!(table.cell_as_int_by_name(1, "Cost"), 0);
//! assert_eq!(table.cell_as_int_by_name(7, "Cost"), 5);
//! # Ok::<(), twoda_core::Error>(())
//! ```

mod accessor;
mod binary;
pub mod error;
pub mod export;
pub mod parser;
pub mod preamble;
pub mod stream;
pub mod table;
mod text;
pub mod tokenizer;

pub use error::{Error, Result};
pub use export::{to_json, write_csv, write_json};
pub use parser::{load, load_bytes, load_file};
pub use preamble::Version;
pub use table::{Row, Table, EMPTY_CELL};
