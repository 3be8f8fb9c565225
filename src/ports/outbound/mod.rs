/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (Azure DevOps, file system, console).
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod source_control_repository;
pub mod work_item_repository;

pub use formatter::ReportFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use source_control_repository::SourceControlRepository;
pub use work_item_repository::{WorkItemRepository, MAX_WORK_ITEM_BATCH};
