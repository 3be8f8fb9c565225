use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Team project reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
}

impl Project {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Git repository inside a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: Uuid,
    pub name: String,
    /// Default branch name without the `refs/heads/` prefix
    pub default_branch: Option<String>,
    pub is_disabled: bool,
}

impl Repository {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            default_branch: None,
            is_disabled: false,
        }
    }

    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = Some(branch.into());
        self
    }

    pub fn is_default_branch(&self, branch: &str) -> bool {
        self.default_branch.as_deref() == Some(branch)
    }
}

/// Branch summary from the branch statistics endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    /// Whether the API flags this branch as a base (tracked) branch
    pub is_base_version: bool,
    pub last_commit_date: Option<DateTime<Utc>>,
}

impl Branch {
    pub fn new(name: impl Into<String>, is_base_version: bool) -> Self {
        Self {
            name: name.into(),
            is_base_version,
            last_commit_date: None,
        }
    }

    pub fn with_last_commit_date(mut self, date: DateTime<Utc>) -> Self {
        self.last_commit_date = Some(date);
        self
    }
}
