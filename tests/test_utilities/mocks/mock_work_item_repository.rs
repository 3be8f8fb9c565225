use ado_scanner::prelude::*;
use ado_scanner::scanning::domain::{RelationKind, WorkItemFields, WorkItemRelation};
use async_trait::async_trait;
use std::collections::HashMap;

const WORK_ITEM_URL: &str = "https://dev.azure.com/contoso/_apis/wit/workItems";

pub fn child(id: i64) -> WorkItemRelation {
    WorkItemRelation::new(
        RelationKind::HierarchyForward,
        format!("{}/{}", WORK_ITEM_URL, id),
    )
}

pub fn related(id: i64) -> WorkItemRelation {
    WorkItemRelation::new(RelationKind::Related, format!("{}/{}", WORK_ITEM_URL, id))
}

pub fn artifact() -> WorkItemRelation {
    WorkItemRelation::new(
        RelationKind::ArtifactLink,
        "vstfs:///Git/Commit/6ce954b1%2F5febef5a%2Fa1b2c3",
    )
}

/// Mock WorkItemRepository backed by an in-memory work item graph
pub struct MockWorkItemRepository {
    pub items: HashMap<WorkItemId, WorkItem>,
    pub query_results: Vec<WorkItemId>,
    pub should_fail: bool,
}

impl MockWorkItemRepository {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            query_results: Vec::new(),
            should_fail: false,
        }
    }

    /// Adds a work item that the query does not return
    pub fn with_item(
        mut self,
        id: i64,
        project: &str,
        title: &str,
        relations: Vec<WorkItemRelation>,
    ) -> Self {
        let fields = WorkItemFields {
            project: project.to_string(),
            title: title.to_string(),
            state: "New".to_string(),
            work_item_type: "User Story".to_string(),
        };
        self.items.insert(
            WorkItemId::new(id),
            WorkItem::new(WorkItemId::new(id), fields, relations),
        );
        self
    }

    /// Adds a Feature that the query returns
    pub fn with_feature(
        mut self,
        id: i64,
        project: &str,
        title: &str,
        relations: Vec<WorkItemRelation>,
    ) -> Self {
        let fields = WorkItemFields {
            project: project.to_string(),
            title: title.to_string(),
            state: "Active".to_string(),
            work_item_type: "Feature".to_string(),
        };
        self.items.insert(
            WorkItemId::new(id),
            WorkItem::new(WorkItemId::new(id), fields, relations),
        );
        self.query_results.push(WorkItemId::new(id));
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }
}

impl Default for MockWorkItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkItemRepository for MockWorkItemRepository {
    async fn query_work_item_ids(&self, _wiql: &str) -> Result<Vec<WorkItemId>> {
        if self.should_fail {
            anyhow::bail!("Mock work item query failure");
        }
        Ok(self.query_results.clone())
    }

    async fn fetch_work_items(&self, ids: &[WorkItemId]) -> Result<Vec<WorkItem>> {
        if self.should_fail {
            anyhow::bail!("Mock work item fetch failure");
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.items.get(id).cloned())
            .collect())
    }
}
