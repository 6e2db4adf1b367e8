//! Small helpers for building OOXML part strings.

use std::borrow::Cow;

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Namespace of relationship ids (`r:id`, `r:embed`).
pub(crate) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// DrawingML main namespace.
pub(crate) const NS_DRAWINGML: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";

/// DrawingML picture namespace.
pub(crate) const NS_PICTURE: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

/// English Metric Units per CSS pixel at 96 dpi.
pub(crate) const EMU_PER_PIXEL: u32 = 9525;

/// Escape text or attribute content.
pub(crate) fn escape(s: &str) -> Cow<'_, str> {
    quick_xml::escape::escape(s)
}

/// Convert a pixel size to EMUs.
pub(crate) fn px_to_emu(px: u32) -> u64 {
    u64::from(px) * u64::from(EMU_PER_PIXEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markup() {
        assert_eq!(
            escape(r#"If "Red Tagged" <R&R>"#),
            "If &quot;Red Tagged&quot; &lt;R&amp;R&gt;"
        );
    }

    #[test]
    fn test_escape_plain_is_borrowed() {
        assert!(matches!(escape("Trailer"), Cow::Borrowed("Trailer")));
    }

    #[test]
    fn test_px_to_emu() {
        assert_eq!(px_to_emu(300), 2_857_500);
    }
}
