//! CSV table loading.

use std::fs::File;
use std::path::Path;

use faultmap_model::{Row, Table};
use tracing::debug;

use crate::error::{IngestError, Result, open_error};

/// Read a CSV file into a [`Table`].
///
/// Header names are trimmed; a UTF-8 BOM on the first header is stripped.
/// Rows shorter than the header surface as a CSV parse error, and a file
/// with a header but no data rows is rejected outright.
pub fn read_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| open_error(path, e))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader.headers().map_err(|e| IngestError::CsvParse {
        path: path.to_path_buf(),
        source: e,
    })?;
    let columns: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            let header = if i == 0 {
                header.trim_start_matches('\u{feff}')
            } else {
                header
            };
            header.trim().to_string()
        })
        .collect();

    let mut table = Table::new(columns.clone());
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        let cells = columns
            .iter()
            .enumerate()
            .map(|(i, column)| (column.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        table.push_row(Row { cells });
    }

    if table.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        columns = table.columns.len(),
        rows = table.len(),
        "loaded CSV table"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_header_and_rows() {
        let file = write_csv("Area,Description\nLine1,Pump trip\nLine2,Valve stuck\n");
        let table = read_table(file.path()).unwrap();

        assert_eq!(table.columns, ["Area", "Description"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].get("Description"), Some("Valve stuck"));
    }

    #[test]
    fn trims_headers_and_strips_bom() {
        let file = write_csv("\u{feff}Area , Description\nLine1,Pump trip\n");
        let table = read_table(file.path()).unwrap();
        assert_eq!(table.columns, ["Area", "Description"]);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let file = write_csv("Description\n\"Pump, spare\"\n");
        let table = read_table(file.path()).unwrap();
        assert_eq!(table.rows[0].get("Description"), Some("Pump, spare"));
    }

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let err = read_table(Path::new("/nonexistent/faults.csv")).unwrap_err();
        assert!(matches!(err, IngestError::FileNotFound { .. }));
    }

    #[test]
    fn header_only_file_is_an_error() {
        let file = write_csv("Area,Description\n");
        let err = read_table(file.path()).unwrap_err();
        assert!(matches!(err, IngestError::EmptyCsv { .. }));
    }
}
