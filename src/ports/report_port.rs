//! Report generation port trait.

use crate::domain::error::TechscoreError;
use crate::domain::runner::UniverseReport;

pub trait ReportPort {
    /// Render the full batch report as text.
    fn render(&self, report: &UniverseReport) -> String;

    /// Default implementation: render and write to `output_path`.
    fn write(&self, report: &UniverseReport, output_path: &str) -> Result<(), TechscoreError> {
        std::fs::write(output_path, self.render(report))?;
        Ok(())
    }
}
