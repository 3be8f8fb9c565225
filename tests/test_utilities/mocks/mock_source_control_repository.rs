use ado_scanner::prelude::*;
use ado_scanner::scanning::domain::PolicyScope;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// Mock SourceControlRepository with one entry per project
pub struct MockSourceControlRepository {
    pub projects: Vec<Project>,
    pub policies: HashMap<String, Vec<PolicyConfiguration>>,
    pub repositories: HashMap<String, Vec<Repository>>,
    pub branches: HashMap<Uuid, Vec<Branch>>,
    pub files: HashMap<(Uuid, String), String>,
}

impl MockSourceControlRepository {
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            policies: HashMap::new(),
            repositories: HashMap::new(),
            branches: HashMap::new(),
            files: HashMap::new(),
        }
    }

    pub fn with_project(mut self, name: &str) -> Self {
        self.projects.push(Project::new(Uuid::new_v4(), name));
        self
    }

    pub fn with_repository(mut self, project: &str, repository: Repository, branches: Vec<Branch>) -> Self {
        self.branches.insert(repository.id, branches);
        self.repositories
            .entry(project.to_string())
            .or_default()
            .push(repository);
        self
    }

    pub fn with_branch_policy(
        mut self,
        project: &str,
        id: i64,
        type_display_name: &str,
        repository_id: Uuid,
        branch: &str,
        settings: Value,
    ) -> Self {
        let scope = PolicyScope {
            repository_id: Some(repository_id),
            ref_name: Some(format!("refs/heads/{}", branch)),
        };
        self.policies
            .entry(project.to_string())
            .or_default()
            .push(PolicyConfiguration::new(
                id,
                true,
                type_display_name,
                vec![scope],
                settings,
            ));
        self
    }

    pub fn with_file(mut self, repository_id: Uuid, branch: &str, content: &str) -> Self {
        self.files
            .insert((repository_id, branch.to_string()), content.to_string());
        self
    }
}

impl Default for MockSourceControlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceControlRepository for MockSourceControlRepository {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    async fn list_policy_configurations(
        &self,
        project: &Project,
    ) -> Result<Vec<PolicyConfiguration>> {
        Ok(self.policies.get(&project.name).cloned().unwrap_or_default())
    }

    async fn list_repositories(&self, project: &Project) -> Result<Vec<Repository>> {
        Ok(self
            .repositories
            .get(&project.name)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_branches(
        &self,
        _project: &Project,
        repository: &Repository,
    ) -> Result<Vec<Branch>> {
        Ok(self.branches.get(&repository.id).cloned().unwrap_or_default())
    }

    async fn fetch_file_content(
        &self,
        _project: &Project,
        repository: &Repository,
        branch: &str,
        _path: &str,
    ) -> Result<String> {
        match self.files.get(&(repository.id, branch.to_string())) {
            Some(content) => Ok(content.clone()),
            None => anyhow::bail!("Mock file not found"),
        }
    }
}
