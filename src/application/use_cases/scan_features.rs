use crate::application::dto::FeatureScanRequest;
use crate::application::read_models::FeatureReport;
use crate::ports::outbound::{ProgressReporter, WorkItemRepository};
use crate::scanning::domain::FeatureStatus;
use crate::scanning::services::{ConnectivityMemo, ConnectivityResolver};
use crate::shared::Result;
use anyhow::Context;

/// ScanFeaturesUseCase - Feature traceability scan
///
/// Runs the work-item query, then resolves for every returned work item
/// whether it is linked to a commit or pull request. One memo table is
/// shared by all features of the run, so shared children are fetched once.
///
/// # Type Parameters
/// * `W` - WorkItemRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanFeaturesUseCase<W, PR> {
    work_items: W,
    progress_reporter: PR,
}

impl<W, PR> ScanFeaturesUseCase<W, PR>
where
    W: WorkItemRepository,
    PR: ProgressReporter,
{
    pub fn new(work_items: W, progress_reporter: PR) -> Self {
        Self {
            work_items,
            progress_reporter,
        }
    }

    /// Executes the feature scan
    ///
    /// # Errors
    /// Work-item query or fetch failures abort the scan.
    pub async fn execute(&self, request: FeatureScanRequest) -> Result<FeatureReport> {
        self.progress_reporter
            .report("🔎 Querying work items...");

        let items = self
            .work_items
            .fetch_query_results(&request.query)
            .await
            .context("Failed to load work items for the feature query")?;

        self.progress_reporter
            .report(&format!("✅ Found {} work item(s)", items.len()));

        let resolver = ConnectivityResolver::new(&self.work_items, request.related_links);
        let mut memo = ConnectivityMemo::new();
        let total = items.len();
        let mut features = Vec::with_capacity(total);

        for (idx, item) in items.iter().enumerate() {
            self.progress_reporter
                .report_progress(idx + 1, total, Some(&item.fields().title));

            let connected = resolver
                .resolve(item, &mut memo)
                .await
                .with_context(|| format!("Failed to resolve links of work item {}", item.id()))?;
            features.push(FeatureStatus::from_work_item(item, connected));
        }

        let report = FeatureReport::new(features);
        self.progress_reporter.report_completion(&format!(
            "✅ Feature scan complete: {} of {} connected to a commit or pull request",
            report.connected_count(),
            report.len()
        ));

        Ok(report)
    }
}
