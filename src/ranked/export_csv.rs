//! CSV export of ranked pairing summaries, one row per opponent.

use std::io::Write;
use std::path::Path;

use crate::ranked::PairingReport;

/// Writes `reports` with a header row to any writer.
pub fn write_reports<W: Write>(writer: W, reports: &[PairingReport]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);
    for report in reports {
        writer.serialize(report)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_reports_csv(path: &Path, reports: &[PairingReport]) -> Result<(), csv::Error> {
    let file = std::fs::File::create(path)?;
    write_reports(file, reports)
}
