//! Spreadsheet test data access.

use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use std::path::Path;

use crate::error::DataError;

/// Read one worksheet cell as a string.
///
/// The workbook is opened read-only and dropped on every exit path. The
/// value comes back exactly as stored: no trimming, no type coercion. A
/// non-string cell is an error, not a stringified number.
pub fn read_cell(path: &Path, sheet: &str, row: u32, col: u32) -> Result<String, DataError> {
    log::debug!(
        "reading cell ({row}, {col}) of sheet '{sheet}' from {}",
        path.display()
    );

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| DataError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let range = workbook.worksheet_range(sheet).map_err(|e| match e {
        XlsxError::WorksheetNotFound(name) => DataError::SheetNotFound(name),
        other => DataError::FileAccess {
            path: path.to_path_buf(),
            source: other,
        },
    })?;

    match range.get_value((row, col)) {
        None | Some(Data::Empty) => Err(DataError::CellMissing { row, col }),
        Some(Data::String(s)) => Ok(s.clone()),
        Some(other) => Err(DataError::CellNotText {
            row,
            col,
            found: other.to_string(),
        }),
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{temp_path, write_workbook};
    use super::*;

    #[test]
    fn returns_raw_cell_string() {
        let path = temp_path("data.xlsx");
        write_workbook(&path, "Sheet1", &[("https://example.com", true)]);

        let value = read_cell(&path, "Sheet1", 0, 0).unwrap();
        assert_eq!(value, "https://example.com");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn does_not_trim_whitespace() {
        let path = temp_path("padded.xlsx");
        write_workbook(&path, "Sheet1", &[("  spaced out  ", true)]);

        let value = read_cell(&path, "Sheet1", 0, 0).unwrap();
        assert_eq!(value, "  spaced out  ");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_file_access() {
        let err = read_cell(Path::new("no/such/book.xlsx"), "Sheet1", 0, 0).unwrap_err();
        assert!(matches!(err, DataError::FileAccess { .. }), "{err}");
    }

    #[test]
    fn missing_sheet_is_not_found() {
        let path = temp_path("sheets.xlsx");
        write_workbook(&path, "Sheet1", &[("x", true)]);

        let err = read_cell(&path, "Sheet2", 0, 0).unwrap_err();
        assert!(matches!(err, DataError::SheetNotFound(name) if name == "Sheet2"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn absent_cell_is_missing() {
        let path = temp_path("sparse.xlsx");
        write_workbook(&path, "Sheet1", &[("only-a1", true)]);

        let err = read_cell(&path, "Sheet1", 4, 2).unwrap_err();
        assert!(matches!(err, DataError::CellMissing { row: 4, col: 2 }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn numeric_cell_is_rejected() {
        let path = temp_path("numeric.xlsx");
        write_workbook(&path, "Sheet1", &[("42", false)]);

        let err = read_cell(&path, "Sheet1", 0, 0).unwrap_err();
        assert!(matches!(err, DataError::CellNotText { row: 0, col: 0, .. }), "{err}");
        std::fs::remove_file(&path).ok();
    }
}
