//! Common test utilities for inspecting rendered packages.
//!
//! DOCX and XLSX outputs are unpacked with `zip` and walked with
//! `quick-xml`, so assertions run against the document structure rather
//! than raw strings.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use quick_xml::events::{BytesStart, Event};

// Re-export fixtures for convenience
pub use super::fixtures::*;

// ============================================================================
// Package Helpers
// ============================================================================

/// Names of every part in the package, in archive order.
#[must_use]
pub fn part_names(package: &[u8]) -> Vec<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(package)).expect("Failed to open ZIP archive");
    (0..archive.len())
        .map(|i| archive.by_index(i).expect("Failed to read entry").name().to_string())
        .collect()
}

/// Raw bytes of one part, or `None` when absent.
#[must_use]
pub fn read_part_bytes(package: &[u8], name: &str) -> Option<Vec<u8>> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(package)).expect("Failed to open ZIP archive");
    let mut file = archive.by_name(name).ok()?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).expect("Failed to read part");
    Some(bytes)
}

/// One part as UTF-8 text. Panics when the part is missing.
#[must_use]
pub fn read_part(package: &[u8], name: &str) -> String {
    let bytes = read_part_bytes(package, name).unwrap_or_else(|| panic!("missing part {name}"));
    String::from_utf8(bytes).expect("Part is not UTF-8")
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

// ============================================================================
// DOCX
// ============================================================================

/// Cell texts of every `<w:tbl>` in document order: tables, rows, cells.
#[must_use]
pub fn docx_tables(document_xml: &str) -> Vec<Vec<Vec<String>>> {
    let mut xml = quick_xml::Reader::from_str(document_xml);
    xml.trim_text(false);

    let mut tables: Vec<Vec<Vec<String>>> = Vec::new();
    let mut in_t = false;
    let mut open_tables = 0usize;

    loop {
        match xml.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:tbl" => {
                    open_tables += 1;
                    tables.push(Vec::new());
                }
                b"w:tr" => tables.last_mut().unwrap().push(Vec::new()),
                b"w:tc" => tables
                    .last_mut()
                    .unwrap()
                    .last_mut()
                    .unwrap()
                    .push(String::new()),
                b"w:t" => in_t = true,
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_t && open_tables > 0 => {
                let text = e.unescape().unwrap();
                if let Some(cell) = tables
                    .last_mut()
                    .and_then(|t| t.last_mut())
                    .and_then(|r| r.last_mut())
                {
                    cell.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:t" => in_t = false,
            Ok(Event::End(ref e)) if e.name().as_ref() == b"w:tbl" => {
                open_tables = open_tables.saturating_sub(1);
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("invalid document XML: {e}"),
            _ => {}
        }
    }

    tables
}

/// Paragraph texts outside any table, with the bold flag of each run.
#[must_use]
pub fn docx_body_paragraphs(document_xml: &str) -> Vec<Vec<(String, bool)>> {
    let mut xml = quick_xml::Reader::from_str(document_xml);
    xml.trim_text(false);

    let mut paragraphs = Vec::new();
    let mut table_depth = 0usize;
    let mut current: Option<Vec<(String, bool)>> = None;
    let mut bold = false;
    let mut in_t = false;

    loop {
        match xml.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth += 1,
                b"w:p" if table_depth == 0 => current = Some(Vec::new()),
                b"w:r" => bold = false,
                b"w:t" => in_t = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"w:b" => bold = true,
            Ok(Event::Text(ref e)) if in_t => {
                if let Some(runs) = current.as_mut() {
                    runs.push((e.unescape().unwrap().into_owned(), bold));
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"w:tbl" => table_depth -= 1,
                b"w:p" if table_depth == 0 => {
                    if let Some(runs) = current.take() {
                        paragraphs.push(runs);
                    }
                }
                b"w:t" => in_t = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => panic!("invalid document XML: {e}"),
            _ => {}
        }
    }

    paragraphs
}

// ============================================================================
// XLSX
// ============================================================================

/// A written worksheet cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XlsxCell {
    pub text: String,
    /// `cellXfs` index.
    pub style: u32,
}

/// Every `<c>` in the sheet keyed by reference ("A1").
#[must_use]
pub fn xlsx_cells(sheet_xml: &str) -> BTreeMap<String, XlsxCell> {
    let mut xml = quick_xml::Reader::from_str(sheet_xml);
    xml.trim_text(false);

    let mut cells = BTreeMap::new();
    let mut current: Option<String> = None;
    let mut in_t = false;

    loop {
        match xml.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"c" => {
                let r = attr(e, b"r").expect("cell without r");
                let style = attr(e, b"s").map_or(0, |s| s.parse().unwrap());
                cells.insert(
                    r.clone(),
                    XlsxCell {
                        text: String::new(),
                        style,
                    },
                );
                current = Some(r);
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"c" => {
                let r = attr(e, b"r").expect("cell without r");
                let style = attr(e, b"s").map_or(0, |s| s.parse().unwrap());
                cells.insert(
                    r,
                    XlsxCell {
                        text: String::new(),
                        style,
                    },
                );
            }
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"t" => in_t = true,
            Ok(Event::Text(ref e)) if in_t => {
                if let Some(cell) = current.as_ref().and_then(|r| cells.get_mut(r)) {
                    cell.text.push_str(&e.unescape().unwrap());
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"t" => in_t = false,
                b"c" => current = None,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => panic!("invalid sheet XML: {e}"),
            _ => {}
        }
    }

    cells
}

/// Text of the five data cells on a 1-based sheet row.
#[must_use]
pub fn xlsx_row_texts(cells: &BTreeMap<String, XlsxCell>, row: u32) -> Vec<String> {
    ["A", "B", "C", "D", "E"]
        .iter()
        .map(|col| {
            cells
                .get(&format!("{col}{row}"))
                .map(|c| c.text.clone())
                .unwrap_or_default()
        })
        .collect()
}

/// Attribute values of every element named `tag` (qualified name).
#[must_use]
pub fn element_attrs(xml_text: &str, tag: &str, key: &str) -> Vec<String> {
    let mut xml = quick_xml::Reader::from_str(xml_text);
    let mut values = Vec::new();
    loop {
        match xml.read_event() {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) if e.name().as_ref() == tag.as_bytes() => {
                if let Some(v) = attr(e, key.as_bytes()) {
                    values.push(v);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("invalid XML: {e}"),
            _ => {}
        }
    }
    values
}

// ============================================================================
// Text
// ============================================================================

/// Split a text report into its lines.
#[must_use]
pub fn text_lines(report: &[u8]) -> Vec<String> {
    String::from_utf8(report.to_vec())
        .expect("Report is not UTF-8")
        .split('\n')
        .map(str::to_string)
        .collect()
}
