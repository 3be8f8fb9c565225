/// Data Transfer Objects for application layer
///
/// DTOs carry scan options from the CLI into the use cases, keeping the
/// domain layer free of argument parsing concerns.
mod output_format;
mod report_kind;
mod scan_request;

pub use output_format::OutputFormat;
pub use report_kind::ReportKind;
pub use scan_request::{
    FeatureScanRequest, RepositoryScanRequest, DEFAULT_FEATURE_QUERY, DEFAULT_README_PATH,
};
