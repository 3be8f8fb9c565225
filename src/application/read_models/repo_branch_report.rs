use crate::scanning::domain::RepoBranchStatus;
use std::collections::HashSet;

/// Repository/branch health report
///
/// Rows are ordered active first, then by repository name. Policy
/// descriptions keep the order they were described in, duplicates dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoBranchReport {
    rows: Vec<RepoBranchStatus>,
}

impl RepoBranchReport {
    pub fn new(mut rows: Vec<RepoBranchStatus>) -> Self {
        for row in &mut rows {
            let mut seen = HashSet::new();
            row.policies.retain(|policy| seen.insert(policy.clone()));
        }
        // Stable sort keeps scan order (project, branch) among equal keys
        rows.sort_by(|a, b| {
            b.active
                .cmp(&a.active)
                .then_with(|| a.repo_name.cmp(&b.repo_name))
        });
        Self { rows }
    }

    pub fn rows(&self) -> &[RepoBranchStatus] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
