use crate::scanning::domain::{WorkItem, WorkItemId};
use crate::shared::Result;
use async_trait::async_trait;

/// Largest number of ids sent in a single work-item batch request
pub const MAX_WORK_ITEM_BATCH: usize = 100;

/// WorkItemRepository port for the work-item tracking API
///
/// # Async Support
/// Methods are async; callers await them one after another.
/// Implementations must be `Send + Sync` so they can be wrapped by caching
/// decorators.
#[async_trait]
pub trait WorkItemRepository: Send + Sync {
    /// Runs a WIQL query and returns the ids of matching work items in query order
    ///
    /// # Errors
    /// Returns an error if the request fails or the query is rejected
    async fn query_work_item_ids(&self, wiql: &str) -> Result<Vec<WorkItemId>>;

    /// Fetches work items with their relations expanded
    ///
    /// Implementations accept any number of ids and split them into
    /// sequential requests of at most [`MAX_WORK_ITEM_BATCH`] ids. Ids that no
    /// longer exist are omitted from the result.
    ///
    /// # Errors
    /// Returns an error if any batch request fails
    async fn fetch_work_items(&self, ids: &[WorkItemId]) -> Result<Vec<WorkItem>>;

    /// Runs a query and fetches every matching work item
    async fn fetch_query_results(&self, wiql: &str) -> Result<Vec<WorkItem>> {
        let ids = self.query_work_item_ids(wiql).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.fetch_work_items(&ids).await
    }
}
