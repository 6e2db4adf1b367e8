//! Utilities for formatting Excel-style cell references and ranges.
//!
//! All inputs are 0-indexed; the produced references are Excel's 1-based
//! A1 notation.

/// Convert a 0-based column index to Excel column letters (A, B, ..., Z, AA, AB, ...)
#[must_use]
pub fn col_to_letter(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'A' + u8::try_from(n % 26).unwrap_or(0)));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Format a cell reference like "B4" from a 0-indexed (row, col).
#[must_use]
pub fn cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", col_to_letter(col), row + 1)
}

/// Format a range like "A1:E1".
#[must_use]
pub fn range_ref(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> String {
    format!(
        "{}:{}",
        cell_ref(start_row, start_col),
        cell_ref(end_row, end_col)
    )
}

/// Format an absolute range like "$A$1:$E$28".
#[must_use]
pub fn absolute_range_ref(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> String {
    format!(
        "${}${}:${}${}",
        col_to_letter(start_col),
        start_row + 1,
        col_to_letter(end_col),
        end_row + 1
    )
}

/// Quote a sheet name for use in a formula or defined name.
#[must_use]
pub fn quote_sheet_name(name: &str) -> String {
    format!("'{}'", name.replace('\'', "''"))
}
