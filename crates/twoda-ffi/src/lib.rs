//! C FFI bindings for twoda-core
//!
//! This crate provides a C-compatible API over a loaded 2DA table. A null
//! table handle behaves like an empty table with no default value.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;
use twoda_core::Table;

/// Opaque handle to a loaded table
pub struct FfiTable {
    inner: Table,
}

/// Borrow a C string as UTF-8, or `None` if null or invalid
unsafe fn str_arg<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    CStr::from_ptr(s).to_str().ok()
}

unsafe fn table_ref<'a>(table: *const FfiTable) -> Option<&'a Table> {
    table.as_ref().map(|t| &t.inner)
}

fn into_c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}

/// Load a 2DA file
///
/// # Safety
/// - `path` must be a valid C string
/// - Returns null on error
/// - The table must be freed with `twoda_free`
#[no_mangle]
pub unsafe extern "C" fn twoda_load_file(path: *const c_char) -> *mut FfiTable {
    let Some(path) = str_arg(path) else {
        return ptr::null_mut();
    };

    match twoda_core::load_file(path) {
        Ok(table) => Box::into_raw(Box::new(FfiTable { inner: table })),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a table
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
#[no_mangle]
pub unsafe extern "C" fn twoda_free(table: *mut FfiTable) {
    if !table.is_null() {
        drop(Box::from_raw(table));
    }
}

/// Get the row count of a table
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
#[no_mangle]
pub unsafe extern "C" fn twoda_row_count(table: *const FfiTable) -> usize {
    table_ref(table).map_or(0, Table::row_count)
}

/// Get the column count of a table
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
#[no_mangle]
pub unsafe extern "C" fn twoda_column_count(table: *const FfiTable) -> usize {
    table_ref(table).map_or(0, Table::column_count)
}

/// Get a column name by index
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
/// - Returns null if index is out of bounds
/// - Caller must free the returned string with `twoda_free_string`
#[no_mangle]
pub unsafe extern "C" fn twoda_header(table: *const FfiTable, index: usize) -> *mut c_char {
    table_ref(table)
        .and_then(|t| t.headers().get(index))
        .map_or(ptr::null_mut(), |h| into_c_string(h))
}

/// Get the index of a named column, or -1 if there is none
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
/// - `name` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn twoda_column_index(table: *const FfiTable, name: *const c_char) -> i64 {
    table_ref(table)
        .zip(str_arg(name))
        .and_then(|(t, name)| t.column_index(name))
        .and_then(|i| i64::try_from(i).ok())
        .unwrap_or(-1)
}

/// Get a cell as a string, resolving missing cells to the table default
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
/// - Caller must free the returned string with `twoda_free_string`
#[no_mangle]
pub unsafe extern "C" fn twoda_cell_string(
    table: *const FfiTable,
    row: usize,
    col: usize,
) -> *mut c_char {
    into_c_string(table_ref(table).map_or("", |t| t.cell_as_string(row, col)))
}

/// Get a cell as a string, looking the column up by name
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
/// - `name` must be a valid C string
/// - Caller must free the returned string with `twoda_free_string`
#[no_mangle]
pub unsafe extern "C" fn twoda_cell_string_by_name(
    table: *const FfiTable,
    row: usize,
    name: *const c_char,
) -> *mut c_char {
    let value = match (table_ref(table), str_arg(name)) {
        (Some(t), Some(name)) => t.cell_as_string_by_name(row, name),
        (Some(t), None) => t.default_string(),
        (None, _) => "",
    };
    into_c_string(value)
}

/// Get a cell as an integer
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
#[no_mangle]
pub unsafe extern "C" fn twoda_cell_int(table: *const FfiTable, row: usize, col: usize) -> i32 {
    table_ref(table).map_or(0, |t| t.cell_as_int(row, col))
}

/// Get a cell as an integer, looking the column up by name
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
/// - `name` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn twoda_cell_int_by_name(
    table: *const FfiTable,
    row: usize,
    name: *const c_char,
) -> i32 {
    match (table_ref(table), str_arg(name)) {
        (Some(t), Some(name)) => t.cell_as_int_by_name(row, name),
        (Some(t), None) => t.default_int(),
        (None, _) => 0,
    }
}

/// Get a cell as a float
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
#[no_mangle]
pub unsafe extern "C" fn twoda_cell_float(table: *const FfiTable, row: usize, col: usize) -> f32 {
    table_ref(table).map_or(0.0, |t| t.cell_as_float(row, col))
}

/// Get a cell as a float, looking the column up by name
///
/// # Safety
/// - `table` must be a valid pointer returned by `twoda_load_file` or null
/// - `name` must be a valid C string
#[no_mangle]
pub unsafe extern "C" fn twoda_cell_float_by_name(
    table: *const FfiTable,
    row: usize,
    name: *const c_char,
) -> f32 {
    match (table_ref(table), str_arg(name)) {
        (Some(t), Some(name)) => t.cell_as_float_by_name(row, name),
        (Some(t), None) => t.default_float(),
        (None, _) => 0.0,
    }
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a twoda_* function or null
#[no_mangle]
pub unsafe extern "C" fn twoda_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
