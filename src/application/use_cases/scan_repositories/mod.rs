use crate::application::dto::RepositoryScanRequest;
use crate::application::read_models::RepoBranchReport;
use crate::ports::outbound::{ProgressReporter, SourceControlRepository};
use crate::scanning::domain::{Branch, Project, RepoBranchStatus, Repository};
use crate::scanning::services::{branch_activity, readme_inspector, PolicyDescriber, PolicyIndex};
use crate::shared::Result;
use anyhow::Context;

/// ScanRepositoriesUseCase - Repository/branch health scan
///
/// Walks projects, repositories and base branches one request at a time.
/// Missing READMEs and unreadable branch lists degrade to default values;
/// project, repository and policy listing failures abort the scan.
///
/// # Type Parameters
/// * `S` - SourceControlRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct ScanRepositoriesUseCase<S, PR> {
    source_control: S,
    progress_reporter: PR,
    describer: PolicyDescriber,
}

impl<S, PR> ScanRepositoriesUseCase<S, PR>
where
    S: SourceControlRepository,
    PR: ProgressReporter,
{
    pub fn new(source_control: S, progress_reporter: PR) -> Self {
        Self {
            source_control,
            progress_reporter,
            describer: PolicyDescriber::new(),
        }
    }

    pub async fn execute(&self, request: RepositoryScanRequest) -> Result<RepoBranchReport> {
        self.progress_reporter.report("📚 Listing projects...");

        let projects = self
            .source_control
            .list_projects()
            .await
            .context("Failed to list projects")?;

        for wanted in &request.projects {
            if !projects.iter().any(|p| p.name.eq_ignore_ascii_case(wanted)) {
                self.progress_reporter
                    .report_warning(&format!("Project '{}' was not found", wanted));
            }
        }

        let mut rows = Vec::new();
        for project in projects
            .iter()
            .filter(|project| request.includes_project(&project.name))
        {
            self.scan_project(project, &request, &mut rows).await?;
        }

        self.progress_reporter.report_completion(&format!(
            "✅ Repository scan complete: {} base branch(es) checked",
            rows.len()
        ));

        Ok(RepoBranchReport::new(rows))
    }

    async fn scan_project(
        &self,
        project: &Project,
        request: &RepositoryScanRequest,
        rows: &mut Vec<RepoBranchStatus>,
    ) -> Result<()> {
        self.progress_reporter
            .report(&format!("📁 Scanning project {}", project.name));

        let policies = self
            .source_control
            .list_policy_configurations(project)
            .await
            .with_context(|| format!("Failed to list policies of project {}", project.name))?;
        let index = PolicyIndex::build(&policies);

        let repositories = self
            .source_control
            .list_repositories(project)
            .await
            .with_context(|| format!("Failed to list repositories of project {}", project.name))?;

        for repository in &repositories {
            if repository.is_disabled {
                self.progress_reporter.report(&format!(
                    "   ⏭️  Skipping disabled repository {}",
                    repository.name
                ));
                continue;
            }

            let branches = match self.source_control.list_branches(project, repository).await {
                Ok(branches) => branches,
                Err(e) => {
                    self.progress_reporter.report_warning(&format!(
                        "Failed to list branches of {}/{}: {}",
                        project.name, repository.name, e
                    ));
                    continue;
                }
            };

            for branch in branches.iter().filter(|b| b.is_base_version) {
                let status = self
                    .inspect_branch(project, repository, branch, &index, request)
                    .await;
                self.progress_reporter.report(&format!(
                    "   {} / {}: README {}, policies {}",
                    status.repo_name,
                    status.branch,
                    yes_no(status.has_read_me),
                    status.policies.len()
                ));
                rows.push(status);
            }
        }

        Ok(())
    }

    async fn inspect_branch(
        &self,
        project: &Project,
        repository: &Repository,
        branch: &Branch,
        index: &PolicyIndex,
        request: &RepositoryScanRequest,
    ) -> RepoBranchStatus {
        let mut status = RepoBranchStatus::new(&project.name, &repository.name, &branch.name);
        status.is_default_branch = repository.is_default_branch(&branch.name);
        status.active = branch_activity::is_active(
            branch.last_commit_date,
            request.as_of,
            request.active_months,
        );

        match self
            .source_control
            .fetch_file_content(project, repository, &branch.name, &request.readme_path)
            .await
        {
            Ok(content) => {
                status.has_read_me = readme_inspector::has_readme(&content);
                status.has_owner = readme_inspector::has_owner(&content);
            }
            Err(e) => {
                self.progress_reporter.report_warning(&format!(
                    "{} not readable on {}/{}: {}",
                    request.readme_path, repository.name, branch.name, e
                ));
            }
        }

        let policies = index.lookup(&repository.id, &branch.name);
        status.has_policy = !policies.is_empty();
        status.policies = self.describer.describe_all(policies);

        status
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
