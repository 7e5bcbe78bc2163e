use std::io::Write;

use super::*;

/// Writes the header and every row to `path`, replacing any existing file.
pub fn write_report(path: &Path, rows: &[ReportRow]) -> Result<()> {
    ensure_parent_directory(path)?;

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create report file: {}", path.display()))?;
    write_rows(&mut writer, rows)
        .with_context(|| format!("failed to write report file: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to finalize report file: {}", path.display()))?;

    Ok(())
}

pub fn write_rows<W: Write>(writer: &mut csv::Writer<W>, rows: &[ReportRow]) -> Result<()> {
    writer.write_record(REPORT_COLUMNS)?;
    for row in rows {
        writer.write_record(row.to_record())?;
    }
    Ok(())
}
