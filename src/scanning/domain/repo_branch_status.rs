/// Health status of one base branch of one repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoBranchStatus {
    pub project: String,
    pub repo_name: String,
    pub branch: String,
    pub active: bool,
    pub is_default_branch: bool,
    pub has_read_me: bool,
    pub has_owner: bool,
    pub has_policy: bool,
    /// Policy descriptions in the order they were found
    pub policies: Vec<String>,
}

impl RepoBranchStatus {
    pub fn new(project: impl Into<String>, repo_name: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            repo_name: repo_name.into(),
            branch: branch.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_all_flags_to_false() {
        let status = RepoBranchStatus::new("Eng", "svc", "main");
        assert_eq!(status.project, "Eng");
        assert_eq!(status.repo_name, "svc");
        assert_eq!(status.branch, "main");
        assert!(!status.active);
        assert!(!status.is_default_branch);
        assert!(!status.has_read_me);
        assert!(!status.has_owner);
        assert!(!status.has_policy);
        assert!(status.policies.is_empty());
    }
}
