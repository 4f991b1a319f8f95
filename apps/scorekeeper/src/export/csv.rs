use crate::export::{ExportError, ExportRow};

/// Comma-separated text with a header line.
pub fn to_csv(header: &[String], rows: &[ExportRow]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row.cells())?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|e| ExportError::Io(e.into_error()))
}
