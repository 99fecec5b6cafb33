//! Shared strings table for string deduplication

use super::xml_writer::XmlWriter;
use crate::error::Result;
use std::collections::HashMap;
use std::io::Write;

/// Workbook-wide table of distinct strings, in first-seen order
#[derive(Default)]
pub struct SharedStrings {
    strings: Vec<String>,
    index: HashMap<String, u32>,
    references: usize,
}

impl SharedStrings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `s`, adding it on first use
    pub fn add_string(&mut self, s: &str) -> u32 {
        self.references += 1;
        if let Some(&idx) = self.index.get(s) {
            return idx;
        }

        let idx = self.strings.len() as u32;
        self.strings.push(s.to_string());
        self.index.insert(s.to_string(), idx);
        idx
    }

    /// Number of distinct strings
    pub fn count(&self) -> usize {
        self.strings.len()
    }

    /// Number of cells that referenced the table
    pub fn references(&self) -> usize {
        self.references
    }

    /// Write `xl/sharedStrings.xml`
    pub fn write_xml<W: Write>(&self, writer: &mut XmlWriter<W>) -> Result<()> {
        writer.write_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n")?;

        writer.start_element("sst")?;
        writer.attribute(
            "xmlns",
            "http://schemas.openxmlformats.org/spreadsheetml/2006/main",
        )?;
        writer.attribute_int("count", self.references as i64)?;
        writer.attribute_int("uniqueCount", self.strings.len() as i64)?;
        writer.close_start_tag()?;

        for s in &self.strings {
            writer.write_str("<si>")?;
            // Leading or trailing blanks are dropped unless preserved explicitly.
            if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
                writer.write_str("<t xml:space=\"preserve\">")?;
            } else {
                writer.write_str("<t>")?;
            }
            writer.write_escaped(s)?;
            writer.write_str("</t></si>")?;
        }

        writer.end_element("sst")?;
        writer.flush()
    }
}
