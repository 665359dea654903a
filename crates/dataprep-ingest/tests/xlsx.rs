//! Integration tests for workbook ingestion, over a generated fixture.

use std::io::Write;

use tempfile::NamedTempFile;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use dataprep_ingest::load_dataset;
use dataprep_model::{ColumnKind, any_to_string};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/worksheets/sheet2.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
<sheet name="Sheet1" sheetId="1" r:id="rId1"/>
<sheet name="Sheet2" sheetId="2" r:id="rId2"/>
</sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

// Style index 1 carries the built-in datetime number format.
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="1"><font/></fonts>
<fills count="1"><fill><patternFill patternType="none"/></fill></fills>
<borders count="1"><border/></borders>
<cellStyleXfs count="1"><xf numFmtId="0"/></cellStyleXfs>
<cellXfs count="2"><xf numFmtId="0"/><xf numFmtId="22" applyNumberFormat="1"/></cellXfs>
</styleSheet>"#;

// Serial 45292 is 2024-01-01; B3 is an error cell and reads as missing.
const SHEET1: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1">
<c r="A1" t="inlineStr"><is><t>name</t></is></c>
<c r="B1" t="inlineStr"><is><t>value</t></is></c>
<c r="C1" t="inlineStr"><is><t>when</t></is></c>
</row>
<row r="2">
<c r="A2" t="inlineStr"><is><t>alpha</t></is></c>
<c r="B2"><v>1.5</v></c>
<c r="C2" s="1"><v>45292.5</v></c>
</row>
<row r="3">
<c r="A3" t="inlineStr"><is><t>beta</t></is></c>
<c r="B3" t="e"><v>#DIV/0!</v></c>
<c r="C3" s="1"><v>45293</v></c>
</row>
</sheetData>
</worksheet>"#;

const SHEET2: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>wrong</t></is></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>sheet</t></is></c></row>
</sheetData>
</worksheet>"#;

fn xlsx_fixture() -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .expect("create temp xlsx");
    let mut archive = ZipWriter::new(file.as_file());
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        ("xl/workbook.xml", WORKBOOK),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
        ("xl/styles.xml", STYLES),
        ("xl/worksheets/sheet1.xml", SHEET1),
        ("xl/worksheets/sheet2.xml", SHEET2),
    ];
    for (name, content) in parts {
        archive.start_file(name, options).expect("start zip entry");
        archive
            .write_all(content.as_bytes())
            .expect("write zip entry");
    }
    archive.finish().expect("finish zip");
    file
}

#[test]
fn loads_first_worksheet_with_typed_columns() {
    let file = xlsx_fixture();
    let dataset = load_dataset(file.path()).expect("load xlsx");
    assert_eq!(dataset.shape(), (2, 3));
    // Sheet2 has a "wrong" header; only the first sheet is read.
    assert_eq!(dataset.column_names(), vec!["name", "value", "when"]);
    assert_eq!(dataset.kind("name"), Some(ColumnKind::Categorical));
    assert_eq!(dataset.kind("value"), Some(ColumnKind::Numeric));
    assert_eq!(dataset.kind("when"), Some(ColumnKind::Datetime));
}

#[test]
fn datetime_cells_render_as_iso() {
    let file = xlsx_fixture();
    let dataset = load_dataset(file.path()).expect("load xlsx");
    assert_eq!(
        any_to_string(dataset.cell("when", 0)),
        "2024-01-01T12:00:00"
    );
    assert_eq!(
        any_to_string(dataset.cell("when", 1)),
        "2024-01-02T00:00:00"
    );
}

#[test]
fn error_cells_read_as_missing() {
    let file = xlsx_fixture();
    let dataset = load_dataset(file.path()).expect("load xlsx");
    assert_eq!(dataset.missing_counts()["value"], 1);
    assert_eq!(
        dataset.numeric_values("value").expect("numeric values"),
        vec![Some(1.5), None]
    );
}

#[test]
fn undecodable_workbook_is_validation_error() {
    let mut file = tempfile::Builder::new()
        .suffix(".xlsx")
        .tempfile()
        .expect("create temp file");
    file.write_all(b"this is not a workbook").expect("write temp file");
    let error = load_dataset(file.path()).expect_err("garbage workbook");
    assert!(error.is_validation());
}

#[test]
fn unreadable_workbook_is_processing_error() {
    let error = load_dataset(std::path::Path::new("/no/such/dir/missing.xlsx"))
        .expect_err("missing workbook");
    assert!(!error.is_validation());
}
