//! Read-only lookups on a decoded [`Table`]
//!
//! A lookup never fails. A cell that does not exist (row out of range, row
//! slot never filled, column past the end of a short row, unknown column
//! name) resolves to the table default. A cell holding `****` exists but is
//! explicitly empty and resolves to `""`, `0` or `0.0`, never to the default.

use crate::table::{parse_float, parse_int, Table, EMPTY_CELL};

/// How a single cell resolves before type conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup<'a> {
    Missing,
    Empty,
    Value(&'a str),
}

impl Table {
    /// Number of row slots
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Column names in column order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of the column called `name`. For duplicated names this is the
    /// last column with that name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header_index.get(name).copied()
    }

    /// The raw cells of a row
    pub fn row(&self, index: usize) -> Option<&[String]> {
        self.rows.get(index)?.as_deref()
    }

    /// All row slots in order; unfilled slots come back as `None`
    pub fn rows(&self) -> impl Iterator<Item = Option<&[String]>> + '_ {
        self.rows.iter().map(|r| r.as_deref())
    }

    /// The raw text of a cell, `****` included
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.row(row)?.get(column).map(String::as_str)
    }

    /// True if the cell exists and is marked empty with `****`
    pub fn is_empty_cell(&self, row: usize, column: usize) -> bool {
        self.cell(row, column) == Some(EMPTY_CELL)
    }

    /// Cell as text; `****` reads as an empty string
    pub fn cell_as_string(&self, row: usize, column: usize) -> &str {
        self.string_of(self.lookup(row, Some(column)))
    }

    /// [`Table::cell_as_string`] with the column looked up by name
    pub fn cell_as_string_by_name(&self, row: usize, column: &str) -> &str {
        self.string_of(self.lookup(row, self.column_index(column)))
    }

    /// Cell as an integer. Text that is not a number reads as 0.
    pub fn cell_as_int(&self, row: usize, column: usize) -> i32 {
        self.int_of(self.lookup(row, Some(column)))
    }

    /// [`Table::cell_as_int`] with the column looked up by name
    pub fn cell_as_int_by_name(&self, row: usize, column: &str) -> i32 {
        self.int_of(self.lookup(row, self.column_index(column)))
    }

    /// Cell as a float. Text that is not a number reads as 0.0.
    pub fn cell_as_float(&self, row: usize, column: usize) -> f32 {
        self.float_of(self.lookup(row, Some(column)))
    }

    /// [`Table::cell_as_float`] with the column looked up by name
    pub fn cell_as_float_by_name(&self, row: usize, column: &str) -> f32 {
        self.float_of(self.lookup(row, self.column_index(column)))
    }

    fn lookup(&self, row: usize, column: Option<usize>) -> Lookup<'_> {
        match column.and_then(|c| self.cell(row, c)) {
            None => Lookup::Missing,
            Some(EMPTY_CELL) => Lookup::Empty,
            Some(value) => Lookup::Value(value),
        }
    }

    fn string_of<'a>(&'a self, cell: Lookup<'a>) -> &'a str {
        match cell {
            Lookup::Missing => &self.default_string,
            Lookup::Empty => "",
            Lookup::Value(value) => value,
        }
    }

    fn int_of(&self, cell: Lookup<'_>) -> i32 {
        match cell {
            Lookup::Missing => self.default_int,
            Lookup::Empty => 0,
            Lookup::Value(value) => parse_int(value),
        }
    }

    fn float_of(&self, cell: Lookup<'_>) -> f32 {
        match cell {
            Lookup::Missing => self.default_float,
            Lookup::Empty => 0.0,
            Lookup::Value(value) => parse_float(value),
        }
    }
}
