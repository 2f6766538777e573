//! Report output port trait.

use crate::domain::error::ZonewatchError;
use crate::domain::report::Report;
use std::path::Path;

/// Port for writing a finished report, replacing any previous one.
pub trait ReportPort {
    fn write(&self, report: &Report, output_path: &Path) -> Result<(), ZonewatchError>;
}
