use crate::scanning::domain::{Branch, PolicyConfiguration, Project, Repository};
use crate::shared::Result;
use async_trait::async_trait;

/// SourceControlRepository port for the project, git and policy APIs
///
/// Listing methods return every page of results.
#[async_trait]
pub trait SourceControlRepository: Send + Sync {
    /// Lists all team projects of the organization
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Lists all policy configurations of a project, enabled or not
    async fn list_policy_configurations(&self, project: &Project)
        -> Result<Vec<PolicyConfiguration>>;

    /// Lists the git repositories of a project
    async fn list_repositories(&self, project: &Project) -> Result<Vec<Repository>>;

    /// Lists branches of a repository with their latest commit
    async fn list_branches(&self, project: &Project, repository: &Repository)
        -> Result<Vec<Branch>>;

    /// Reads a file's content at the tip of a branch
    ///
    /// # Errors
    /// Returns an error when the file does not exist or the request fails
    async fn fetch_file_content(
        &self,
        project: &Project,
        repository: &Repository,
        branch: &str,
        path: &str,
    ) -> Result<String>;
}
