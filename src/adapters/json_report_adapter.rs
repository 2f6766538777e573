//! JSON file report adapter.

use crate::domain::error::ZonewatchError;
use crate::domain::report::Report;
use crate::ports::report_port::ReportPort;
use std::fs;
use std::path::Path;

/// Writes the report as pretty-printed UTF-8 JSON, fully replacing any
/// previous file at the target path.
pub struct JsonReportAdapter;

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &Report, output_path: &Path) -> Result<(), ZonewatchError> {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(output_path, json)?;
        Ok(())
    }
}
