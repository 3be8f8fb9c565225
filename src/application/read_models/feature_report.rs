use crate::scanning::domain::FeatureStatus;

/// Feature traceability report, ordered by work item id ascending
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureReport {
    features: Vec<FeatureStatus>,
}

impl FeatureReport {
    pub fn new(mut features: Vec<FeatureStatus>) -> Self {
        features.sort_by_key(|feature| feature.id());
        Self { features }
    }

    pub fn features(&self) -> &[FeatureStatus] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of features linked to a commit or pull request
    pub fn connected_count(&self) -> usize {
        self.features
            .iter()
            .filter(|feature| feature.is_connected_with_commit_or_pull_request())
            .count()
    }
}
