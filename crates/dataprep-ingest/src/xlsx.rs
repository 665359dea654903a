//! Spreadsheet reading via calamine. Only the first worksheet is read.

use std::path::Path;

use calamine::{Data, Error as CalamineError, Reader, XlsxError, open_workbook_auto};

use dataprep_model::{EngineError, Result, format_numeric};

use crate::table::RawTable;

/// Renders a spreadsheet cell to the same raw string form CSV cells use.
/// Datetime cells become ISO-8601 strings; error cells read as missing.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(value) => value.trim().to_string(),
        Data::Float(value) => format_numeric(*value),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(_) => {
            use calamine::DataType as _;
            cell.as_datetime()
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
                .unwrap_or_default()
        }
        Data::DateTimeIso(value) => value.trim().to_string(),
        Data::DurationIso(value) => value.trim().to_string(),
    }
}

/// Reads the first worksheet of an XLSX workbook into a [`RawTable`].
///
/// An undecodable workbook is a validation error (the caller sent a
/// malformed file); an I/O failure while opening it is a processing error.
pub fn read_xlsx_table(path: &Path) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path).map_err(|error| match error {
        CalamineError::Io(source) | CalamineError::Xlsx(XlsxError::Io(source)) => {
            EngineError::processing("open spreadsheet", source)
        }
        other => EngineError::validation(format!("failed to open spreadsheet: {other}")),
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| EngineError::validation("spreadsheet has no worksheets"))?
        .map_err(|error| EngineError::processing("read spreadsheet", error))?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for row in range.rows() {
        let cells: Vec<String> = row.iter().map(cell_to_string).collect();
        if cells.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(cells);
    }
    if raw_rows.is_empty() {
        return Ok(RawTable {
            headers: Vec::new(),
            rows: Vec::new(),
        });
    }
    let headers: Vec<String> = raw_rows[0]
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            if header.is_empty() {
                format!("column_{}", idx + 1)
            } else {
                header.clone()
            }
        })
        .collect();
    let mut rows = Vec::with_capacity(raw_rows.len() - 1);
    for record in raw_rows.iter().skip(1) {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        rows.push(row);
    }
    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_render_like_csv_values() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Float(4.0)), "4");
        assert_eq!(cell_to_string(&Data::Float(4.25)), "4.25");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::String(" a ".to_string())), "a");
    }
}
