//! In-process Azure DevOps stand-in for client and CLI tests.
//!
//! Serves a tiny organization named `contoso`:
//! - projects `Eng` and `Web`, split over two pages
//! - Features 1 (linked to a commit through child 11), 2 (related to 21,
//!   which only reaches a commit through another related link) and 3
//!   (child 99 no longer exists)
//! - repository `svc` in `Eng` with a protected, documented `main`

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const TEST_PAT: &str = "test-pat";
/// `Basic base64(":test-pat")`
const EXPECTED_AUTHORIZATION: &str = "Basic OnRlc3QtcGF0";

pub const ENG_PROJECT_ID: &str = "6ce954b1-ce1f-45d1-b94d-e6bf2464ba2c";
pub const WEB_PROJECT_ID: &str = "278d5cd2-584d-4b63-824a-2ba458937249";
pub const SVC_REPOSITORY_ID: &str = "5febef5a-833d-4e14-b9c0-14cb638f91e6";

#[derive(Default)]
pub struct FakeState {
    /// Number of upcoming project list requests answered with 503
    pub failing_project_requests: AtomicUsize,
    pub project_requests: AtomicUsize,
    /// Size of every work item batch request received
    pub batch_sizes: Mutex<Vec<usize>>,
}

/// A running fake server with its base URL and shared state.
pub struct FakeServer {
    pub organization_url: String,
    pub state: Arc<FakeState>,
    _handle: tokio::task::JoinHandle<()>,
}

impl FakeServer {
    pub fn project_requests(&self) -> usize {
        self.state.project_requests.load(Ordering::SeqCst)
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.state.batch_sizes.lock().unwrap().clone()
    }
}

/// Spawn the fake organization on a random port.
pub async fn spawn_fake_server() -> FakeServer {
    spawn_fake_server_with(FakeState::default()).await
}

pub async fn spawn_fake_server_with(state: FakeState) -> FakeServer {
    let state = Arc::new(state);
    let app = Router::new()
        .route("/contoso/_apis/wit/wiql", post(wiql))
        .route("/contoso/_apis/wit/workitemsbatch", post(work_items_batch))
        .route("/contoso/_apis/projects", get(projects))
        .route(
            "/contoso/{project}/_apis/policy/configurations",
            get(policy_configurations),
        )
        .route("/contoso/{project}/_apis/git/repositories", get(repositories))
        .route(
            "/contoso/{project}/_apis/git/repositories/{repository}/stats/branches",
            get(branches),
        )
        .route(
            "/contoso/{project}/_apis/git/repositories/{repository}/items",
            get(items),
        )
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeServer {
        organization_url: format!("http://{addr}/contoso"),
        state,
        _handle: handle,
    }
}

/// The sign-in redirect Azure DevOps answers with for a bad token.
fn sign_in_page() -> Response {
    (
        StatusCode::NON_AUTHORITATIVE_INFORMATION,
        [("content-type", "text/html")],
        "<html><body>Sign in</body></html>",
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some(EXPECTED_AUTHORIZATION)
}

fn work_item_url(id: i64) -> String {
    format!("https://dev.azure.com/contoso/_apis/wit/workItems/{}", id)
}

fn work_item(id: i64, work_item_type: &str, title: &str, relations: Vec<Value>) -> Value {
    json!({
        "id": id,
        "fields": {
            "System.TeamProject": "Eng",
            "System.Title": title,
            "System.State": "Active",
            "System.WorkItemType": work_item_type,
        },
        "relations": relations,
    })
}

fn relation(rel: &str, url: String) -> Value {
    json!({ "rel": rel, "url": url, "attributes": {} })
}

fn commit_link() -> Value {
    relation(
        "ArtifactLink",
        "vstfs:///Git/Commit/6ce954b1%2F5febef5a%2Fa1b2c3".to_string(),
    )
}

fn work_item_graph() -> HashMap<i64, Value> {
    let mut graph = HashMap::new();
    graph.insert(
        1,
        work_item(
            1,
            "Feature",
            "Checkout",
            vec![relation("System.LinkTypes.Hierarchy-Forward", work_item_url(11))],
        ),
    );
    graph.insert(
        11,
        work_item(
            11,
            "User Story",
            "Pay by card",
            vec![
                relation("System.LinkTypes.Hierarchy-Reverse", work_item_url(1)),
                commit_link(),
            ],
        ),
    );
    graph.insert(
        2,
        work_item(
            2,
            "Feature",
            "Search",
            vec![relation("System.LinkTypes.Related", work_item_url(21))],
        ),
    );
    graph.insert(
        21,
        work_item(
            21,
            "User Story",
            "Index catalog",
            vec![relation("System.LinkTypes.Related", work_item_url(22))],
        ),
    );
    graph.insert(
        22,
        work_item(22, "Task", "Build indexer", vec![commit_link()]),
    );
    graph.insert(
        3,
        work_item(
            3,
            "Feature",
            "Orphan",
            vec![relation("System.LinkTypes.Hierarchy-Forward", work_item_url(99))],
        ),
    );
    graph
}

async fn wiql(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return sign_in_page();
    }
    Json(json!({
        "queryType": "flat",
        "workItems": [
            { "id": 1, "url": work_item_url(1) },
            { "id": 2, "url": work_item_url(2) },
            { "id": 3, "url": work_item_url(3) },
        ],
    }))
    .into_response()
}

async fn work_items_batch(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !authorized(&headers) {
        return sign_in_page();
    }
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let ids: Vec<i64> = request["ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();
    state.batch_sizes.lock().unwrap().push(ids.len());

    let graph = work_item_graph();
    let value: Vec<Value> = ids
        .iter()
        .map(|id| graph.get(id).cloned().unwrap_or(Value::Null))
        .collect();
    Json(json!({ "count": value.len(), "value": value })).into_response()
}

async fn projects(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return sign_in_page();
    }
    state.project_requests.fetch_add(1, Ordering::SeqCst);

    let pending_failures = state.failing_project_requests.load(Ordering::SeqCst);
    if pending_failures > 0 {
        state
            .failing_project_requests
            .store(pending_failures - 1, Ordering::SeqCst);
        return (StatusCode::SERVICE_UNAVAILABLE, "try again later").into_response();
    }

    match params.get("continuationToken").map(String::as_str) {
        None => {
            let mut response = Json(json!({
                "count": 1,
                "value": [{ "id": ENG_PROJECT_ID, "name": "Eng" }],
            }))
            .into_response();
            response.headers_mut().insert(
                "x-ms-continuationtoken",
                HeaderValue::from_static("page 2"),
            );
            response
        }
        Some("page 2") => Json(json!({
            "count": 1,
            "value": [{ "id": WEB_PROJECT_ID, "name": "Web" }],
        }))
        .into_response(),
        Some(_) => (StatusCode::BAD_REQUEST, "unknown continuation token").into_response(),
    }
}

async fn policy_configurations(headers: HeaderMap, Path(project): Path<String>) -> Response {
    if !authorized(&headers) {
        return sign_in_page();
    }
    if project != ENG_PROJECT_ID {
        return Json(json!({ "count": 0, "value": [] })).into_response();
    }
    let scope = json!([{ "refName": "refs/heads/main", "matchKind": "Exact", "repositoryId": SVC_REPOSITORY_ID }]);
    Json(json!({
        "count": 3,
        "value": [
            {
                "id": 1,
                "isEnabled": true,
                "type": { "displayName": "Minimum number of reviewers" },
                "settings": { "minimumApproverCount": 2, "creatorVoteCounts": true, "scope": scope },
            },
            {
                "id": 2,
                "isEnabled": true,
                "type": { "displayName": "Build" },
                "settings": { "buildDefinitionId": 7, "scope": scope },
            },
            {
                "id": 3,
                "isEnabled": false,
                "type": { "displayName": "Comment requirements" },
                "settings": { "scope": scope },
            },
        ],
    }))
    .into_response()
}

async fn repositories(headers: HeaderMap, Path(project): Path<String>) -> Response {
    if !authorized(&headers) {
        return sign_in_page();
    }
    if project != ENG_PROJECT_ID {
        return Json(json!({ "count": 0, "value": [] })).into_response();
    }
    Json(json!({
        "count": 1,
        "value": [{
            "id": SVC_REPOSITORY_ID,
            "name": "svc",
            "defaultBranch": "refs/heads/main",
            "isDisabled": false,
        }],
    }))
    .into_response()
}

async fn branches(headers: HeaderMap, Path((_project, _repository)): Path<(String, String)>) -> Response {
    if !authorized(&headers) {
        return sign_in_page();
    }
    let recent = (chrono::Utc::now() - chrono::Duration::days(5)).to_rfc3339();
    let stale = (chrono::Utc::now() - chrono::Duration::days(400)).to_rfc3339();
    Json(json!({
        "count": 3,
        "value": [
            { "name": "main", "isBaseVersion": true, "commit": { "committer": { "date": recent } } },
            { "name": "release/1.0", "isBaseVersion": true, "commit": { "committer": { "date": stale } } },
            { "name": "feature/x", "isBaseVersion": false, "commit": { "committer": { "date": recent } } },
        ],
    }))
    .into_response()
}

async fn items(
    headers: HeaderMap,
    Path((_project, _repository)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return sign_in_page();
    }
    match params.get("versionDescriptor.version").map(String::as_str) {
        Some("main") => Json(json!({
            "path": "/README.md",
            "content": "# svc\n\nOwner: payments@contoso.com\n",
        }))
        .into_response(),
        _ => (StatusCode::NOT_FOUND, "item not found").into_response(),
    }
}
