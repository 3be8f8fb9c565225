use crate::application::read_models::{FeatureReport, RepoBranchReport};
use crate::shared::Result;

/// ReportFormatter port for rendering scan reports
///
/// This port abstracts the output layout (CSV, console table, ...).
/// Both reports arrive already sorted; formatters only lay them out.
pub trait ReportFormatter {
    /// Renders the feature traceability report
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn format_features(&self, report: &FeatureReport) -> Result<String>;

    /// Renders the repository/branch health report
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn format_repo_branches(&self, report: &RepoBranchReport) -> Result<String>;
}
