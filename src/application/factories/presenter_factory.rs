use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::application::dto::OutputFormat;
use crate::ports::outbound::OutputPresenter;
use std::path::{Path, PathBuf};

/// File name of the feature traceability CSV
pub const FEATURE_REPORT_FILE: &str = "result_feature.csv";
/// File name of the repository/branch CSV
pub const REPO_BRANCH_REPORT_FILE: &str = "result_repobranch.csv";

/// Where a rendered report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    Stdout,
    File(PathBuf),
}

impl PresenterType {
    /// CSV reports land in `output_dir/file_name`, tables on stdout
    pub fn for_report(format: OutputFormat, output_dir: &Path, file_name: &str) -> Self {
        match format {
            OutputFormat::Csv => PresenterType::File(output_dir.join(file_name)),
            OutputFormat::Table => PresenterType::Stdout,
        }
    }
}

/// Factory for creating output presenters
pub struct PresenterFactory;

impl PresenterFactory {
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}
