use crate::scanning::policies::RelatedLinkPolicy;
use crate::scanning::services::branch_activity::DEFAULT_ACTIVE_MONTHS;
use chrono::{DateTime, Utc};

/// Work-item query used when none is configured
pub const DEFAULT_FEATURE_QUERY: &str =
    "SELECT [Id],[Title],[State] FROM workitems WHERE [Work Item Type] = 'Feature'";

/// Path of the README checked on every base branch
pub const DEFAULT_README_PATH: &str = "README.md";

/// FeatureScanRequest - Input of the feature traceability scan
#[derive(Debug, Clone)]
pub struct FeatureScanRequest {
    /// WIQL query selecting the features to report on
    pub query: String,
    /// How far related links are followed
    pub related_links: RelatedLinkPolicy,
}

impl FeatureScanRequest {
    pub fn new(query: impl Into<String>, related_links: RelatedLinkPolicy) -> Self {
        Self {
            query: query.into(),
            related_links,
        }
    }
}

impl Default for FeatureScanRequest {
    fn default() -> Self {
        Self::new(DEFAULT_FEATURE_QUERY, RelatedLinkPolicy::default())
    }
}

/// RepositoryScanRequest - Input of the repository/branch health scan
#[derive(Debug, Clone)]
pub struct RepositoryScanRequest {
    /// Reference time for the activity window
    pub as_of: DateTime<Utc>,
    pub active_months: u32,
    pub readme_path: String,
    /// Project names to scan; empty means every project
    pub projects: Vec<String>,
}

impl RepositoryScanRequest {
    pub fn new(as_of: DateTime<Utc>) -> Self {
        Self {
            as_of,
            active_months: DEFAULT_ACTIVE_MONTHS,
            readme_path: DEFAULT_README_PATH.to_string(),
            projects: Vec::new(),
        }
    }

    pub fn with_active_months(mut self, months: u32) -> Self {
        self.active_months = months;
        self
    }

    pub fn with_projects(mut self, projects: Vec<String>) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_readme_path(mut self, path: impl Into<String>) -> Self {
        self.readme_path = path.into();
        self
    }

    /// Whether a project passes the name filter (case-insensitive)
    pub fn includes_project(&self, name: &str) -> bool {
        self.projects.is_empty()
            || self
                .projects
                .iter()
                .any(|wanted| wanted.eq_ignore_ascii_case(name))
    }
}
