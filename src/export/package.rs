//! OPC package writer shared by the DOCX and XLSX serializers.
//!
//! Parts are deflated in insertion order with the fixed ZIP epoch
//! timestamp, so identical input always yields identical bytes.

use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::Result;

use super::xml::{escape, XML_DECLARATION};

pub(crate) const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub(crate) const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
pub(crate) const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
pub(crate) const REL_WORKSHEET: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
pub(crate) const REL_DRAWING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/drawing";

/// Builder for a ZIP-based Office package.
pub(crate) struct PackageWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
}

impl PackageWriter {
    pub(crate) fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::with_capacity(16 * 1024))),
            options: FileOptions::default().compression_method(zip::CompressionMethod::Deflated),
        }
    }

    /// Add one part at `path` (no leading slash).
    pub(crate) fn add_part(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.zip.start_file(path, self.options)?;
        self.zip.write_all(data)?;
        Ok(())
    }

    pub(crate) fn finish(mut self) -> Result<Vec<u8>> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

/// `[Content_Types].xml` contents.
#[derive(Default)]
pub(crate) struct ContentTypes {
    defaults: Vec<(&'static str, &'static str)>,
    overrides: Vec<(String, &'static str)>,
}

impl ContentTypes {
    /// Starts with the `rels` and `xml` defaults every package needs.
    pub(crate) fn new() -> Self {
        let mut types = Self::default();
        types.add_default(
            "rels",
            "application/vnd.openxmlformats-package.relationships+xml",
        );
        types.add_default("xml", "application/xml");
        types
    }

    pub(crate) fn add_default(&mut self, extension: &'static str, content_type: &'static str) {
        if !self.defaults.iter().any(|(ext, _)| *ext == extension) {
            self.defaults.push((extension, content_type));
        }
    }

    pub(crate) fn add_override(&mut self, part_name: &str, content_type: &'static str) {
        self.overrides.push((format!("/{part_name}"), content_type));
    }

    pub(crate) fn to_xml(&self) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str(XML_DECLARATION);
        out.push('\n');
        out.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        for (ext, content_type) in &self.defaults {
            out.push_str(&format!(
                "<Default Extension=\"{ext}\" ContentType=\"{content_type}\"/>"
            ));
        }
        for (part, content_type) in &self.overrides {
            out.push_str(&format!(
                "<Override PartName=\"{}\" ContentType=\"{content_type}\"/>",
                escape(part)
            ));
        }
        out.push_str("</Types>");
        out
    }
}

/// A `.rels` part.
#[derive(Default)]
pub(crate) struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    /// Add a relationship and return its id (`rId1`, `rId2`, ...).
    pub(crate) fn add(&mut self, rel_type: &'static str, target: &str) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push((id.clone(), rel_type, target.to_string()));
        id
    }

    pub(crate) fn to_xml(&self) -> String {
        let mut out = String::with_capacity(512);
        out.push_str(XML_DECLARATION);
        out.push('\n');
        out.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (id, rel_type, target) in &self.entries {
            out.push_str(&format!(
                "<Relationship Id=\"{id}\" Type=\"{rel_type}\" Target=\"{}\"/>",
                escape(target)
            ));
        }
        out.push_str("</Relationships>");
        out
    }
}

/// Root `_rels/.rels` pointing at the main document part.
pub(crate) fn root_relationships(main_part: &str) -> String {
    let mut rels = Relationships::default();
    rels.add(REL_OFFICE_DOCUMENT, main_part);
    rels.to_xml()
}
