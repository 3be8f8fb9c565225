use super::{WorkItem, WorkItemId};

/// Traceability status of a single Feature work item
///
/// Created once per queried Feature and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureStatus {
    id: WorkItemId,
    project: String,
    title: String,
    status: String,
    is_connected_with_commit_or_pull_request: bool,
}

impl FeatureStatus {
    pub fn new(
        id: WorkItemId,
        project: String,
        title: String,
        status: String,
        is_connected_with_commit_or_pull_request: bool,
    ) -> Self {
        Self {
            id,
            project,
            title,
            status,
            is_connected_with_commit_or_pull_request,
        }
    }

    /// Builds the status from the work item's fields and a resolved connectivity verdict
    pub fn from_work_item(item: &WorkItem, connected: bool) -> Self {
        let fields = item.fields();
        Self::new(
            item.id(),
            fields.project.clone(),
            fields.title.clone(),
            fields.state.clone(),
            connected,
        )
    }

    pub fn id(&self) -> WorkItemId {
        self.id
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_connected_with_commit_or_pull_request(&self) -> bool {
        self.is_connected_with_commit_or_pull_request
    }
}
