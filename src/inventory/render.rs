use crate::inventory::error::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Indentation used for a rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStyle {
    /// One-space indent, used by the inventory, group and record documents
    Listing,
    /// Two-space indent, used by the single-host facts document
    Facts,
}

impl DocumentStyle {
    fn indent(self) -> &'static [u8] {
        match self {
            DocumentStyle::Listing => b" ",
            DocumentStyle::Facts => b"  ",
        }
    }
}

/// Pretty-print a document with its object keys sorted
pub fn render<T: Serialize>(document: &T, style: DocumentStyle) -> Result<String> {
    // Round-tripping through `Value` sorts keys of flattened and map fields alike.
    let value = serde_json::to_value(document)?;

    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(style.indent());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&out).into_owned())
}
