use crate::ports::outbound::{SourceControlRepository, WorkItemRepository, MAX_WORK_ITEM_BATCH};
use crate::scanning::domain::{
    branch_name_from_ref, Branch, PolicyConfiguration, PolicyScope, Project, RelationKind,
    Repository, WorkItem, WorkItemFields, WorkItemId, WorkItemRelation,
};
use crate::shared::error::ScanError;
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use uuid::Uuid;

const API_VERSION: &str = "7.0";
const CONTINUATION_HEADER: &str = "x-ms-continuationtoken";
const TIMEOUT_SECONDS: u64 = 30;
const RETRY_DELAY_MS: u64 = 500;
const MAX_ERROR_DETAILS: usize = 300;

// Wire formats. Only the fields the scanner reads are declared.

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct WiqlResponse {
    #[serde(rename = "workItems", default)]
    work_items: Vec<WiqlReference>,
}

#[derive(Debug, Deserialize)]
struct WiqlReference {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct WireWorkItem {
    id: i64,
    #[serde(default)]
    fields: WireFields,
    #[serde(default)]
    relations: Option<Vec<WireRelation>>,
}

#[derive(Debug, Default, Deserialize)]
struct WireFields {
    #[serde(rename = "System.TeamProject", default)]
    team_project: String,
    #[serde(rename = "System.Title", default)]
    title: String,
    #[serde(rename = "System.State", default)]
    state: String,
    #[serde(rename = "System.WorkItemType", default)]
    work_item_type: String,
}

#[derive(Debug, Deserialize)]
struct WireRelation {
    rel: String,
    #[serde(default)]
    url: String,
}

#[derive(Debug, Deserialize)]
struct WireProject {
    id: Uuid,
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireRepository {
    id: Uuid,
    name: String,
    #[serde(rename = "defaultBranch", default)]
    default_branch: Option<String>,
    #[serde(rename = "isDisabled", default)]
    is_disabled: bool,
}

#[derive(Debug, Deserialize)]
struct WireBranchStats {
    name: String,
    #[serde(rename = "isBaseVersion", default)]
    is_base_version: bool,
    #[serde(default)]
    commit: Option<WireCommit>,
}

#[derive(Debug, Deserialize)]
struct WireCommit {
    #[serde(default)]
    committer: Option<WireGitUser>,
}

#[derive(Debug, Deserialize)]
struct WireGitUser {
    #[serde(default)]
    date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct WirePolicy {
    id: i64,
    #[serde(rename = "isEnabled", default)]
    is_enabled: bool,
    #[serde(rename = "type")]
    policy_type: WirePolicyType,
    #[serde(default)]
    settings: Value,
}

#[derive(Debug, Deserialize)]
struct WirePolicyType {
    #[serde(rename = "displayName", default)]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct WireScope {
    #[serde(rename = "repositoryId", default)]
    repository_id: Option<Uuid>,
    #[serde(rename = "refName", default)]
    ref_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireItem {
    #[serde(default)]
    content: Option<String>,
}

impl From<WireWorkItem> for WorkItem {
    fn from(wire: WireWorkItem) -> Self {
        let fields = WorkItemFields {
            project: wire.fields.team_project,
            title: wire.fields.title,
            state: wire.fields.state,
            work_item_type: wire.fields.work_item_type,
        };
        let relations = wire
            .relations
            .unwrap_or_default()
            .into_iter()
            .map(|r| WorkItemRelation::new(RelationKind::from_rel(&r.rel), r.url))
            .collect();
        WorkItem::new(WorkItemId::new(wire.id), fields, relations)
    }
}

impl From<WireProject> for Project {
    fn from(wire: WireProject) -> Self {
        Project::new(wire.id, wire.name)
    }
}

impl From<WireRepository> for Repository {
    fn from(wire: WireRepository) -> Self {
        let mut repository = Repository::new(wire.id, wire.name);
        if let Some(branch) = wire.default_branch {
            let name = branch_name_from_ref(&branch).to_string();
            repository = repository.with_default_branch(name);
        }
        repository.is_disabled = wire.is_disabled;
        repository
    }
}

impl From<WireBranchStats> for Branch {
    fn from(wire: WireBranchStats) -> Self {
        let branch = Branch::new(wire.name, wire.is_base_version);
        match wire.commit.and_then(|c| c.committer).and_then(|u| u.date) {
            Some(date) => branch.with_last_commit_date(date),
            None => branch,
        }
    }
}

impl From<WirePolicy> for PolicyConfiguration {
    fn from(wire: WirePolicy) -> Self {
        // Scopes live inside the settings object
        let scopes = wire
            .settings
            .get("scope")
            .cloned()
            .and_then(|scope| serde_json::from_value::<Vec<WireScope>>(scope).ok())
            .unwrap_or_default()
            .into_iter()
            .map(|s| PolicyScope {
                repository_id: s.repository_id,
                ref_name: s.ref_name,
            })
            .collect();
        PolicyConfiguration::new(
            wire.id,
            wire.is_enabled,
            wire.policy_type.display_name,
            scopes,
            wire.settings,
        )
    }
}

/// Connection settings for [`AzureDevOpsClient`]
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub organization_url: String,
    pub personal_access_token: String,
    /// Extra attempts for network errors, 429 and 5xx responses
    pub max_retries: u32,
}

impl ClientSettings {
    pub fn new(organization_url: impl Into<String>, personal_access_token: impl Into<String>) -> Self {
        Self {
            organization_url: organization_url.into(),
            personal_access_token: personal_access_token.into(),
            max_retries: 0,
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

/// Checks the organization URL and strips trailing slashes
fn normalize_organization_url(url: &str) -> Result<String> {
    let invalid = |reason: &str| ScanError::InvalidOrganizationUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = url.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| invalid("the URL must start with https:// or http://"))?;

    if rest.is_empty() {
        return Err(invalid("the URL has no host").into());
    }
    if rest.contains(['?', '#']) {
        return Err(invalid("query strings and fragments are not allowed").into());
    }
    Ok(trimmed.to_string())
}

/// Appends `api-version` and the given query parameters, with encoded values
fn with_query(url: &str, params: &[(&str, &str)]) -> String {
    let mut full = format!("{}?api-version={}", url, API_VERSION);
    for (key, value) in params {
        full.push('&');
        full.push_str(key);
        full.push('=');
        full.push_str(&urlencoding::encode(value));
    }
    full
}

fn truncate_details(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= MAX_ERROR_DETAILS {
        return text.to_string();
    }
    let head: String = text.chars().take(MAX_ERROR_DETAILS).collect();
    format!("{}...", head)
}

/// AzureDevOpsClient adapter for the Azure DevOps REST API (version 7.0)
///
/// Implements both repository ports. Requests run one at a time and
/// authenticate with a personal access token over basic auth.
///
/// # Errors
/// - `203` (sign-in redirect) and `401` become [`ScanError::AuthenticationFailed`]
/// - other non-success statuses become [`ScanError::ApiRequestFailed`]
/// - unparseable bodies become [`ScanError::InvalidResponse`]
#[derive(Clone)]
pub struct AzureDevOpsClient {
    client: reqwest::Client,
    organization_url: String,
    personal_access_token: String,
    max_retries: u32,
}

impl AzureDevOpsClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let organization_url = normalize_organization_url(&settings.organization_url)?;
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("ado-scanner/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            organization_url,
            personal_access_token: settings.personal_access_token,
            max_retries: settings.max_retries,
        })
    }

    pub fn organization_url(&self) -> &str {
        &self.organization_url
    }

    fn org_url(&self, path: &str) -> String {
        format!("{}/{}", self.organization_url, path)
    }

    fn project_url(&self, project: &Project, path: &str) -> String {
        format!("{}/{}/{}", self.organization_url, project.id, path)
    }

    fn repository_url(&self, project: &Project, repository: &Repository, path: &str) -> String {
        self.project_url(
            project,
            &format!("_apis/git/repositories/{}/{}", repository.id, path),
        )
    }

    fn is_transient(status: StatusCode) -> bool {
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    async fn back_off(attempt: u32) {
        tokio::time::sleep(Duration::from_millis(RETRY_DELAY_MS * attempt as u64)).await;
    }

    /// Sends a request, retrying transient failures up to `max_retries` times
    async fn send(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Response> {
        let endpoint = url.split('?').next().unwrap_or(url).to_string();
        let mut attempt = 0;

        loop {
            let mut request = self
                .client
                .request(method.clone(), url)
                .basic_auth("", Some(&self.personal_access_token));
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = match request.send().await {
                Ok(response) => response,
                Err(e) if attempt < self.max_retries => {
                    attempt += 1;
                    eprintln!(
                        "   ↻ Retrying {} after network error ({}/{}): {}",
                        endpoint, attempt, self.max_retries, e
                    );
                    Self::back_off(attempt).await;
                    continue;
                }
                Err(e) => {
                    return Err(anyhow::Error::new(e)
                        .context(format!("Request to {} failed", endpoint)));
                }
            };

            let status = response.status();
            if status == StatusCode::NON_AUTHORITATIVE_INFORMATION
                || status == StatusCode::UNAUTHORIZED
            {
                return Err(ScanError::AuthenticationFailed {
                    endpoint,
                    status: status.as_u16(),
                }
                .into());
            }
            if status.is_success() {
                return Ok(response);
            }
            if Self::is_transient(status) && attempt < self.max_retries {
                attempt += 1;
                eprintln!(
                    "   ↻ Retrying {} after HTTP {} ({}/{})",
                    endpoint,
                    status.as_u16(),
                    attempt,
                    self.max_retries
                );
                Self::back_off(attempt).await;
                continue;
            }

            let details = response.text().await.unwrap_or_default();
            return Err(ScanError::ApiRequestFailed {
                endpoint,
                status: status.as_u16(),
                details: truncate_details(&details),
            }
            .into());
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ScanError::InvalidResponse {
                endpoint: endpoint.to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(Method::GET, url, None).await?;
        Self::parse(response, url).await
    }

    async fn post_json<T: DeserializeOwned>(&self, url: &str, body: &Value) -> Result<T> {
        let response = self.send(Method::POST, url, Some(body)).await?;
        Self::parse(response, url).await
    }

    /// Reads every page of a list endpoint, following continuation tokens
    async fn get_paged<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let page_url = match &continuation {
                Some(token) => with_query(url, &[("continuationToken", token.as_str())]),
                None => with_query(url, &[]),
            };
            let response = self.send(Method::GET, &page_url, None).await?;
            continuation = response
                .headers()
                .get(CONTINUATION_HEADER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
                .filter(|token| !token.is_empty());

            let page: ListResponse<T> = Self::parse(response, url).await?;
            items.extend(page.value);

            if continuation.is_none() {
                return Ok(items);
            }
        }
    }
}

#[async_trait]
impl WorkItemRepository for AzureDevOpsClient {
    async fn query_work_item_ids(&self, wiql: &str) -> Result<Vec<WorkItemId>> {
        let url = with_query(&self.org_url("_apis/wit/wiql"), &[]);
        let response: WiqlResponse = self.post_json(&url, &json!({ "query": wiql })).await?;
        Ok(response
            .work_items
            .into_iter()
            .map(|reference| WorkItemId::new(reference.id))
            .collect())
    }

    async fn fetch_work_items(&self, ids: &[WorkItemId]) -> Result<Vec<WorkItem>> {
        let url = with_query(&self.org_url("_apis/wit/workitemsbatch"), &[]);
        let mut items = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_WORK_ITEM_BATCH) {
            let body = json!({
                "ids": chunk.iter().map(|id| id.value()).collect::<Vec<_>>(),
                "$expand": "Relations",
                "errorPolicy": "Omit",
            });
            // Omitted (deleted or inaccessible) ids come back as null
            let batch: ListResponse<Option<WireWorkItem>> = self.post_json(&url, &body).await?;
            items.extend(batch.value.into_iter().flatten().map(WorkItem::from));
        }

        Ok(items)
    }
}

#[async_trait]
impl SourceControlRepository for AzureDevOpsClient {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        let projects: Vec<WireProject> = self.get_paged(&self.org_url("_apis/projects")).await?;
        Ok(projects.into_iter().map(Project::from).collect())
    }

    async fn list_policy_configurations(
        &self,
        project: &Project,
    ) -> Result<Vec<PolicyConfiguration>> {
        let url = self.project_url(project, "_apis/policy/configurations");
        let policies: Vec<WirePolicy> = self.get_paged(&url).await?;
        Ok(policies.into_iter().map(PolicyConfiguration::from).collect())
    }

    async fn list_repositories(&self, project: &Project) -> Result<Vec<Repository>> {
        let url = with_query(&self.project_url(project, "_apis/git/repositories"), &[]);
        let repositories: ListResponse<WireRepository> = self.get_json(&url).await?;
        Ok(repositories
            .value
            .into_iter()
            .map(Repository::from)
            .collect())
    }

    async fn list_branches(
        &self,
        project: &Project,
        repository: &Repository,
    ) -> Result<Vec<Branch>> {
        let url = with_query(&self.repository_url(project, repository, "stats/branches"), &[]);
        let branches: ListResponse<WireBranchStats> = self.get_json(&url).await?;
        Ok(branches.value.into_iter().map(Branch::from).collect())
    }

    async fn fetch_file_content(
        &self,
        project: &Project,
        repository: &Repository,
        branch: &str,
        path: &str,
    ) -> Result<String> {
        let absolute_path = format!("/{}", path.trim_start_matches('/'));
        let url = with_query(
            &self.repository_url(project, repository, "items"),
            &[
                ("path", absolute_path.as_str()),
                ("includeContent", "true"),
                ("versionDescriptor.version", branch),
                ("versionDescriptor.versionType", "branch"),
                ("$format", "json"),
            ],
        );
        let item: WireItem = self.get_json(&url).await?;
        Ok(item.content.unwrap_or_default())
    }
}
