use crate::scanning::domain::{branch_name_from_ref, PolicyConfiguration};
use std::collections::HashMap;
use uuid::Uuid;

/// Enabled branch policies keyed by repository and branch
///
/// Keys have the form `"{repositoryId}-{branchName}"` with the branch name
/// stripped of `refs/heads/`. Every scope of a policy is indexed; scopes
/// without a repository id or ref name are skipped.
#[derive(Debug, Default, Clone)]
pub struct PolicyIndex {
    entries: HashMap<String, Vec<PolicyConfiguration>>,
}

impl PolicyIndex {
    pub fn build(policies: &[PolicyConfiguration]) -> Self {
        let mut entries: HashMap<String, Vec<PolicyConfiguration>> = HashMap::new();

        for policy in policies.iter().filter(|p| p.is_enabled()) {
            for scope in policy.scopes() {
                let (Some(repository_id), Some(ref_name)) =
                    (scope.repository_id, scope.ref_name.as_deref())
                else {
                    continue;
                };
                let key = Self::key(&repository_id, branch_name_from_ref(ref_name));
                let bucket = entries.entry(key).or_default();
                if !bucket.iter().any(|existing| existing.id() == policy.id()) {
                    bucket.push(policy.clone());
                }
            }
        }

        Self { entries }
    }

    fn key(repository_id: &Uuid, branch: &str) -> String {
        format!("{}-{}", repository_id, branch)
    }

    /// Policies applying to exactly this repository and branch
    pub fn lookup(&self, repository_id: &Uuid, branch: &str) -> &[PolicyConfiguration] {
        self.entries
            .get(&Self::key(repository_id, branch_name_from_ref(branch)))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
