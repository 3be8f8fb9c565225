/// Mock implementations for testing
mod mock_progress_reporter;
mod mock_source_control_repository;
mod mock_work_item_repository;

pub use mock_progress_reporter::MockProgressReporter;
pub use mock_source_control_repository::MockSourceControlRepository;
pub use mock_work_item_repository::{artifact, child, related, MockWorkItemRepository};
