//! Result output sinks.
//!
//! Results go either to a CSV file or to stdout; both paths share the csv
//! writer so quoting is consistent. Existing files are never clobbered
//! unless `--force` is given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use faultmap_ingest::IngestError;
use tracing::info;

/// Refuse an existing output path unless overwriting was requested.
pub fn ensure_writable(path: &Path, force: bool) -> Result<(), IngestError> {
    if path.exists() && !force {
        return Err(IngestError::OutputExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Write a header and rows as CSV, to a file when `path` is given or to
/// stdout otherwise.
pub fn write_rows(
    path: Option<&Path>,
    header: &[&str],
    rows: &[Vec<String>],
) -> Result<(), IngestError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| IngestError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
            let mut writer = csv::Writer::from_writer(BufWriter::new(file));
            write_csv(&mut writer, header, rows).map_err(|e| IngestError::FileWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
            info!(path = %path.display(), rows = rows.len(), "wrote result CSV");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = csv::Writer::from_writer(stdout.lock());
            write_csv(&mut writer, header, rows).map_err(|e| IngestError::FileWrite {
                path: "stdout".into(),
                source: e,
            })?;
        }
    }
    Ok(())
}

fn write_csv<W: Write>(
    writer: &mut csv::Writer<W>,
    header: &[&str],
    rows: &[Vec<String>],
) -> io::Result<()> {
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
