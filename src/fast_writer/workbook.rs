//! Streaming workbook with ZIP compression

use chrono::NaiveDateTime;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::{CompressionMethod, DateTime};

use super::shared_strings::SharedStrings;
use super::xml_writer::XmlWriter;
use crate::error::{FixtureError, Result};
use crate::types::CellValue;

const SPREADSHEET_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const PACKAGE_RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// Streaming workbook writer
///
/// Rows go straight into the open worksheet part of the archive; only the
/// shared strings table is kept in memory until [`FastWorkbook::close`].
///
/// # Examples
///
/// ```no_run
/// use xlsx_fixtures::fast_writer::FastWorkbook;
/// use xlsx_fixtures::CellValue;
///
/// let mut workbook = FastWorkbook::new("output.xlsx")?;
/// workbook.add_worksheet("Products")?;
/// workbook.write_row(&["Product", "Price"])?;
/// workbook.write_row_typed(&[CellValue::from("Laptop"), CellValue::Float(999.99)])?;
/// workbook.close()?;
/// # Ok::<(), xlsx_fixtures::FixtureError>(())
/// ```
pub struct FastWorkbook {
    zip: ZipWriter<BufWriter<File>>,
    options: SimpleFileOptions,
    shared_strings: SharedStrings,
    worksheets: Vec<String>,
    sheet_open: bool,
    current_row: u32,
    xml_buffer: Vec<u8>,
    flush_interval: u32,
    created: Option<NaiveDateTime>,
}

impl FastWorkbook {
    /// Create a new workbook file, truncating any existing one
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        let writer = BufWriter::with_capacity(64 * 1024, file);

        // Fixed entry timestamps keep repeated runs byte-identical.
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(6))
            .last_modified_time(DateTime::default());

        Ok(FastWorkbook {
            zip: ZipWriter::new(writer),
            options,
            shared_strings: SharedStrings::new(),
            worksheets: Vec::new(),
            sheet_open: false,
            current_row: 0,
            xml_buffer: Vec::with_capacity(8192),
            flush_interval: 1000,
            created: None,
        })
    }

    /// Flush the archive every `interval` rows
    pub fn set_flush_interval(&mut self, interval: u32) {
        self.flush_interval = interval.max(1);
    }

    /// Timestamp written to `docProps/core.xml`
    pub fn set_created(&mut self, created: NaiveDateTime) {
        self.created = Some(created);
    }

    /// Names of the worksheets added so far
    pub fn worksheet_names(&self) -> &[String] {
        &self.worksheets
    }

    /// Close the open worksheet, if any, and start a new one
    pub fn add_worksheet(&mut self, name: &str) -> Result<()> {
        self.finish_current_worksheet()?;

        self.worksheets.push(name.to_string());
        let sheet_path = format!("xl/worksheets/sheet{}.xml", self.worksheets.len());
        self.zip.start_file(sheet_path, self.options)?;

        let mut xml_writer = XmlWriter::new(&mut self.zip);
        xml_writer.write_str(XML_DECLARATION)?;
        xml_writer.start_element("worksheet")?;
        xml_writer.attribute("xmlns", SPREADSHEET_NS)?;
        xml_writer.attribute("xmlns:r", RELATIONSHIPS_NS)?;
        xml_writer.close_start_tag()?;
        xml_writer.start_element("sheetData")?;
        xml_writer.close_start_tag()?;
        xml_writer.flush()?;

        self.sheet_open = true;
        self.current_row = 0;
        Ok(())
    }

    /// Write a row of text cells to the current worksheet
    pub fn write_row(&mut self, values: &[&str]) -> Result<()> {
        let cells: Vec<CellValue> = values.iter().map(|v| CellValue::from(*v)).collect();
        self.write_row_typed(&cells)
    }

    /// Write a row of typed cells to the current worksheet
    ///
    /// Text goes through the shared strings table, numbers and booleans are
    /// written inline, empty cells are omitted.
    pub fn write_row_typed(&mut self, values: &[CellValue]) -> Result<()> {
        if !self.sheet_open {
            return Err(FixtureError::WriteError("No active worksheet".to_string()));
        }

        self.current_row += 1;
        let mut row_buf = itoa::Buffer::new();
        let row_num = row_buf.format(self.current_row);

        self.xml_buffer.clear();
        self.xml_buffer.extend_from_slice(b"<row r=\"");
        self.xml_buffer.extend_from_slice(row_num.as_bytes());
        self.xml_buffer.extend_from_slice(b"\">");

        for (col_idx, value) in values.iter().enumerate() {
            let (cell_type, text) = match value {
                CellValue::Empty => continue,
                CellValue::String(s) => (Some("s"), self.shared_strings.add_string(s).to_string()),
                CellValue::Int(i) => (None, itoa::Buffer::new().format(*i).to_string()),
                CellValue::Float(f) if f.is_finite() => (None, f.to_string()),
                CellValue::Float(f) => (
                    Some("s"),
                    self.shared_strings.add_string(&f.to_string()).to_string(),
                ),
                CellValue::Bool(b) => (Some("b"), if *b { "1" } else { "0" }.to_string()),
            };

            self.xml_buffer.extend_from_slice(b"<c r=\"");
            self.xml_buffer
                .extend_from_slice(col_to_letter(col_idx as u32 + 1).as_bytes());
            self.xml_buffer.extend_from_slice(row_num.as_bytes());
            self.xml_buffer.push(b'"');
            if let Some(t) = cell_type {
                self.xml_buffer.extend_from_slice(b" t=\"");
                self.xml_buffer.extend_from_slice(t.as_bytes());
                self.xml_buffer.push(b'"');
            }
            self.xml_buffer.extend_from_slice(b"><v>");
            self.xml_buffer.extend_from_slice(text.as_bytes());
            self.xml_buffer.extend_from_slice(b"</v></c>");
        }

        self.xml_buffer.extend_from_slice(b"</row>");
        self.zip.write_all(&self.xml_buffer)?;

        if self.current_row % self.flush_interval == 0 {
            self.zip.flush()?;
        }

        Ok(())
    }

    /// Rows written to the current worksheet
    pub fn current_row(&self) -> u32 {
        self.current_row
    }

    fn finish_current_worksheet(&mut self) -> Result<()> {
        if !self.sheet_open {
            return Ok(());
        }

        let mut xml_writer = XmlWriter::new(&mut self.zip);
        xml_writer.end_element("sheetData")?;
        xml_writer.end_element("worksheet")?;
        xml_writer.flush()?;

        self.sheet_open = false;
        Ok(())
    }

    /// Close the workbook and write the remaining package parts
    pub fn close(mut self) -> Result<()> {
        if self.worksheets.is_empty() {
            return Err(FixtureError::WriteError(
                "A workbook needs at least one worksheet".to_string(),
            ));
        }
        self.finish_current_worksheet()?;

        self.zip.start_file("[Content_Types].xml", self.options)?;
        self.write_content_types()?;

        self.zip.start_file("_rels/.rels", self.options)?;
        self.zip.write_all(ROOT_RELS.as_bytes())?;

        self.zip.start_file("docProps/core.xml", self.options)?;
        self.write_core_props()?;

        self.zip.start_file("docProps/app.xml", self.options)?;
        self.zip.write_all(APP_PROPS.as_bytes())?;

        self.zip.start_file("xl/sharedStrings.xml", self.options)?;
        {
            let mut xml_writer = XmlWriter::new(&mut self.zip);
            self.shared_strings.write_xml(&mut xml_writer)?;
        }

        self.zip.start_file("xl/workbook.xml", self.options)?;
        self.write_workbook_xml()?;

        self.zip.start_file("xl/_rels/workbook.xml.rels", self.options)?;
        self.write_workbook_rels()?;

        self.zip.start_file("xl/styles.xml", self.options)?;
        self.zip.write_all(STYLES.as_bytes())?;

        let mut inner = self.zip.finish()?;
        inner.flush()?;
        Ok(())
    }

    fn write_content_types(&mut self) -> Result<()> {
        let mut xml_writer = XmlWriter::new(&mut self.zip);
        xml_writer.write_str(XML_DECLARATION)?;
        xml_writer.start_element("Types")?;
        xml_writer.attribute(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/content-types",
        )?;
        xml_writer.close_start_tag()?;

        xml_writer.write_str(
            "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
             <Default Extension=\"xml\" ContentType=\"application/xml\"/>",
        )?;

        let overrides = [
            ("/xl/workbook.xml", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"),
            ("/xl/styles.xml", "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"),
            ("/xl/sharedStrings.xml", "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"),
            ("/docProps/core.xml", "application/vnd.openxmlformats-package.core-properties+xml"),
            ("/docProps/app.xml", "application/vnd.openxmlformats-officedocument.extended-properties+xml"),
        ];
        for (part, content_type) in overrides {
            xml_writer.start_element("Override")?;
            xml_writer.attribute("PartName", part)?;
            xml_writer.attribute("ContentType", content_type)?;
            xml_writer.write_raw(b"/>")?;
        }

        for sheet_id in 1..=self.worksheets.len() {
            xml_writer.start_element("Override")?;
            xml_writer.attribute("PartName", &format!("/xl/worksheets/sheet{}.xml", sheet_id))?;
            xml_writer.attribute(
                "ContentType",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml",
            )?;
            xml_writer.write_raw(b"/>")?;
        }

        xml_writer.end_element("Types")?;
        xml_writer.flush()
    }

    fn write_core_props(&mut self) -> Result<()> {
        let created = self
            .created
            .map(|ts| ts.format("%Y-%m-%dT%H:%M:%SZ").to_string())
            .unwrap_or_else(|| "2024-01-01T00:00:00Z".to_string());

        let mut xml_writer = XmlWriter::new(&mut self.zip);
        xml_writer.write_str(XML_DECLARATION)?;
        xml_writer.write_str(
            "<cp:coreProperties \
             xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
             xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
             xmlns:dcterms=\"http://purl.org/dc/terms/\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
        )?;
        xml_writer.write_str("<dc:creator>xlsx-fixtures</dc:creator>")?;
        xml_writer.write_str("<cp:lastModifiedBy>xlsx-fixtures</cp:lastModifiedBy>")?;
        for tag in ["dcterms:created", "dcterms:modified"] {
            xml_writer.start_element(tag)?;
            xml_writer.attribute("xsi:type", "dcterms:W3CDTF")?;
            xml_writer.close_start_tag()?;
            xml_writer.write_str(&created)?;
            xml_writer.end_element(tag)?;
        }
        xml_writer.end_element("cp:coreProperties")?;
        xml_writer.flush()
    }

    fn write_workbook_xml(&mut self) -> Result<()> {
        let mut xml_writer = XmlWriter::new(&mut self.zip);

        xml_writer.write_str(XML_DECLARATION)?;
        xml_writer.start_element("workbook")?;
        xml_writer.attribute("xmlns", SPREADSHEET_NS)?;
        xml_writer.attribute("xmlns:r", RELATIONSHIPS_NS)?;
        xml_writer.close_start_tag()?;

        xml_writer.start_element("sheets")?;
        xml_writer.close_start_tag()?;

        for (i, name) in self.worksheets.iter().enumerate() {
            let sheet_id = i + 1;
            xml_writer.start_element("sheet")?;
            xml_writer.attribute("name", name)?;
            xml_writer.attribute_int("sheetId", sheet_id as i64)?;
            xml_writer.attribute("r:id", &format!("rId{}", sheet_id))?;
            xml_writer.write_raw(b"/>")?;
        }

        xml_writer.end_element("sheets")?;
        xml_writer.end_element("workbook")?;
        xml_writer.flush()
    }

    fn write_workbook_rels(&mut self) -> Result<()> {
        let sheet_count = self.worksheets.len();
        let mut xml_writer = XmlWriter::new(&mut self.zip);

        xml_writer.write_str(XML_DECLARATION)?;
        xml_writer.start_element("Relationships")?;
        xml_writer.attribute("xmlns", PACKAGE_RELS_NS)?;
        xml_writer.close_start_tag()?;

        let mut relationships: Vec<(String, &str)> = (1..=sheet_count)
            .map(|id| (format!("worksheets/sheet{}.xml", id), "worksheet"))
            .collect();
        relationships.push(("styles.xml".to_string(), "styles"));
        relationships.push(("sharedStrings.xml".to_string(), "sharedStrings"));

        for (i, (target, kind)) in relationships.iter().enumerate() {
            xml_writer.start_element("Relationship")?;
            xml_writer.attribute("Id", &format!("rId{}", i + 1))?;
            xml_writer.attribute("Type", &format!("{}/{}", RELATIONSHIPS_NS, kind))?;
            xml_writer.attribute("Target", target)?;
            xml_writer.write_raw(b"/>")?;
        }

        xml_writer.end_element("Relationships")?;
        xml_writer.flush()
    }
}

/// Convert a 1-based column number to its letter (1 -> A, 27 -> AA)
pub(crate) fn col_to_letter(col: u32) -> String {
    let mut col_str = String::new();
    let mut n = col;
    while n > 0 {
        let rem = (n - 1) % 26;
        col_str.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    col_str
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

const APP_PROPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">
<Application>xlsx-fixtures</Application>
<DocSecurity>0</DocSecurity>
<ScaleCrop>false</ScaleCrop>
<LinksUpToDate>false</LinksUpToDate>
<SharedDoc>false</SharedDoc>
<HyperlinksChanged>false</HyperlinksChanged>
<AppVersion>1.0</AppVersion>
</Properties>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="1">
<font><sz val="11"/><name val="Calibri"/></font>
</fonts>
<fills count="2">
<fill><patternFill patternType="none"/></fill>
<fill><patternFill patternType="gray125"/></fill>
</fills>
<borders count="1">
<border><left/><right/><top/><bottom/><diagonal/></border>
</borders>
<cellStyleXfs count="1">
<xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
</cellStyleXfs>
<cellXfs count="1">
<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
</cellXfs>
</styleSheet>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    fn read_part(path: &Path, part: &str) -> String {
        let file = File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name(part).unwrap();
        let mut xml = String::new();
        entry.read_to_string(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_col_to_letter() {
        assert_eq!(col_to_letter(1), "A");
        assert_eq!(col_to_letter(26), "Z");
        assert_eq!(col_to_letter(27), "AA");
        assert_eq!(col_to_letter(703), "AAA");
    }

    #[test]
    fn test_fast_workbook() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("test.xlsx");

        let mut workbook = FastWorkbook::new(&path)?;
        workbook.set_flush_interval(1);
        workbook.add_worksheet("Sheet1")?;
        workbook.write_row(&["Name", "Age"])?;
        workbook.write_row_typed(&[CellValue::from("Alice"), CellValue::Int(30)])?;
        assert_eq!(workbook.current_row(), 2);
        workbook.close()?;

        let sheet = read_part(&path, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("<row r=\"1\">"));
        assert!(sheet.contains("<c r=\"B2\"><v>30</v></c>"));
        assert!(sheet.contains("<c r=\"A2\" t=\"s\"><v>2</v></c>"));
        Ok(())
    }

    #[test]
    fn test_bool_and_non_finite_cells() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("special.xlsx");

        let mut workbook = FastWorkbook::new(&path)?;
        workbook.add_worksheet("Sheet1")?;
        workbook.write_row_typed(&[CellValue::Bool(true), CellValue::Float(f64::NAN)])?;
        workbook.close()?;

        let sheet = read_part(&path, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("<c r=\"A1\" t=\"b\"><v>1</v></c>"));
        assert!(sheet.contains("<c r=\"B1\" t=\"s\"><v>0</v></c>"));

        let strings = read_part(&path, "xl/sharedStrings.xml");
        assert!(strings.contains("NaN"));
        Ok(())
    }

    #[test]
    fn test_every_sheet_gets_content_type() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("multi.xlsx");

        let mut workbook = FastWorkbook::new(&path)?;
        workbook.add_worksheet("Sheet1")?;
        workbook.write_row(&["a"])?;
        workbook.add_worksheet("Products")?;
        assert_eq!(workbook.current_row(), 0);
        workbook.write_row_typed(&[CellValue::Float(25.5), CellValue::Empty])?;
        assert_eq!(workbook.worksheet_names(), ["Sheet1", "Products"]);
        workbook.close()?;

        let types = read_part(&path, "[Content_Types].xml");
        assert!(types.contains("/xl/worksheets/sheet1.xml"));
        assert!(types.contains("/xl/worksheets/sheet2.xml"));

        let book = read_part(&path, "xl/workbook.xml");
        assert!(book.contains("<sheet name=\"Products\" sheetId=\"2\" r:id=\"rId2\"/>"));

        let sheet2 = read_part(&path, "xl/worksheets/sheet2.xml");
        assert!(sheet2.contains("<c r=\"A1\"><v>25.5</v></c>"));
        assert!(!sheet2.contains("B1"));
        Ok(())
    }

    #[test]
    fn test_write_without_sheet_fails() -> Result<()> {
        let dir = tempdir()?;
        let mut workbook = FastWorkbook::new(dir.path().join("x.xlsx"))?;
        let err = workbook.write_row(&["orphan"]).unwrap_err();
        assert!(matches!(err, FixtureError::WriteError(_)));
        Ok(())
    }

    #[test]
    fn test_output_is_reproducible() -> Result<()> {
        let dir = tempdir()?;
        let write = |name: &str| -> Result<Vec<u8>> {
            let path = dir.path().join(name);
            let mut workbook = FastWorkbook::new(&path)?;
            workbook.add_worksheet("Sheet1")?;
            workbook.write_row(&["Name", "Age"])?;
            workbook.close()?;
            Ok(std::fs::read(&path)?)
        };

        assert_eq!(write("a.xlsx")?, write("b.xlsx")?);
        Ok(())
    }
}
