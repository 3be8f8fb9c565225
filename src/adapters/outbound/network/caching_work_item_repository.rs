use crate::ports::outbound::WorkItemRepository;
use crate::scanning::domain::{WorkItem, WorkItemId};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::Arc;

/// CachingWorkItemRepository wraps a WorkItemRepository and keeps every
/// fetched work item in memory for the rest of the run.
///
/// Features often share children and related items; with the cache each id
/// is requested from the inner repository at most once. Ids the inner
/// repository omitted (deleted or inaccessible) are remembered too.
///
/// Query results are never cached: a WIQL query is run once per scan.
pub struct CachingWorkItemRepository<R: WorkItemRepository> {
    inner: R,
    cache: Arc<DashMap<WorkItemId, Option<WorkItem>>>,
}

impl<R: WorkItemRepository> CachingWorkItemRepository<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Returns the current cache size (for testing/monitoring)
    #[cfg(test)]
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[async_trait]
impl<R: WorkItemRepository> WorkItemRepository for CachingWorkItemRepository<R> {
    async fn query_work_item_ids(&self, wiql: &str) -> Result<Vec<WorkItemId>> {
        self.inner.query_work_item_ids(wiql).await
    }

    async fn fetch_work_items(&self, ids: &[WorkItemId]) -> Result<Vec<WorkItem>> {
        let mut seen = HashSet::new();
        let missing: Vec<WorkItemId> = ids
            .iter()
            .copied()
            .filter(|id| !self.cache.contains_key(id) && seen.insert(*id))
            .collect();

        if !missing.is_empty() {
            let fetched = self.inner.fetch_work_items(&missing).await?;
            for id in &missing {
                self.cache.insert(*id, None);
            }
            for item in fetched {
                self.cache.insert(item.id(), Some(item));
            }
        }

        // Answer in request order, skipping omitted ids
        Ok(ids
            .iter()
            .filter_map(|id| self.cache.get(id).and_then(|entry| entry.value().clone()))
            .collect())
    }
}
