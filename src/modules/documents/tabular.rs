use std::path::Path;

use calamine::{open_workbook_auto, Reader};

use super::{DocumentError, Result};

/// One unit per data row, each rendered as `header: value` lines
pub fn extract_csv_rows(bytes: &[u8]) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| DocumentError::Extraction(format!("invalid CSV header: {}", e)))?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| DocumentError::Extraction(format!("invalid CSV row: {}", e)))?;
        let lines: Vec<String> = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| format!("{}: {}", header.trim(), value.trim()))
            .collect();
        rows.push(lines.join("\n"));
    }

    Ok(rows)
}

/// All sheets of a workbook, one tab-separated line per row
pub fn extract_workbook(path: &Path) -> Result<String> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DocumentError::Extraction(format!("invalid workbook: {}", e)))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| DocumentError::Extraction(format!("sheet {}: {}", name, e)))?;

        let rows: Vec<String> = range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_string())
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .filter(|line| !line.trim().is_empty())
            .collect();

        sheets.push(format!("{}\n{}", name, rows.join("\n")));
    }

    Ok(sheets.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_row_units() {
        let rows = extract_csv_rows(b"subject,room\nMath,A1\nPhysics,B2\n").unwrap();
        assert_eq!(
            rows,
            vec![
                "subject: Math\nroom: A1".to_string(),
                "subject: Physics\nroom: B2".to_string(),
            ]
        );
    }

    #[test]
    fn test_csv_header_only_has_no_units() {
        assert!(extract_csv_rows(b"subject,room\n").unwrap().is_empty());
    }

    #[test]
    fn test_workbook_rejects_garbage() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("grades.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();

        assert!(matches!(
            extract_workbook(&path),
            Err(DocumentError::Extraction(_))
        ));
    }
}
