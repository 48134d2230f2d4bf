use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use super::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::auth::{AuthScheme, HostingMode};
use crate::config::{Credentials, ServerConfig};
use crate::constants::{
    AGILE_API_PREFIX, ASSIGNED_COMMENT_PREFIX, CHECK_QUERY_FIELDS, CHECK_QUERY_PAGE_SIZE,
    ISSUE_LIST_FIELDS, MAX_RESULTS, QUERY_FIELDS,
};
use crate::error::{JiraError, JiraResult};
use crate::formatting::{issue_line, issue_link, sprint_row};
use crate::models::*;
use crate::reporting::{PlanReporter, ReportingFailure, TaskRef};

/// Result of [`JiraClient::query`]: key → summary, plus every plan record
/// that could not be reported.
#[derive(Debug, Default)]
pub struct QueryOutcome {
    pub issues: BTreeMap<String, String>,
    pub reporting_failures: Vec<ReportingFailure>,
}

/// Façade over Jira's REST API.
///
/// The hosting mode and authentication scheme are resolved once at
/// construction and reused for every request. Requests are issued one at a
/// time; nothing is retried.
pub struct JiraClient {
    server: Arc<ServerConfig>,
    credentials: Credentials,
    auth: AuthScheme,
    hosting_mode: HostingMode,
    transport: Arc<dyn HttpTransport>,
    reporter: Option<Arc<dyn PlanReporter>>,
    task: Option<TaskRef>,
}

impl JiraClient {
    pub fn new(server: Option<Arc<ServerConfig>>, credentials: Credentials) -> JiraResult<Self> {
        let server = server.ok_or_else(|| JiraError::ConfigError("No server provided.".to_string()))?;
        let transport = Arc::new(ReqwestTransport::new(&server)?);
        Self::with_transport(Some(server), credentials, transport)
    }

    pub fn with_transport(
        server: Option<Arc<ServerConfig>>,
        credentials: Credentials,
        transport: Arc<dyn HttpTransport>,
    ) -> JiraResult<Self> {
        let server = server.ok_or_else(|| JiraError::ConfigError("No server provided.".to_string()))?;
        let auth = AuthScheme::resolve(&server, &credentials);
        let hosting_mode = auth.hosting_mode();
        debug!(?auth, %hosting_mode, url = %server.url, "Resolved Jira authentication");

        Ok(Self {
            server,
            credentials,
            auth,
            hosting_mode,
            transport,
            reporter: None,
            task: None,
        })
    }

    /// Forward plan records for `task` to `reporter` after queries.
    pub fn with_reporting(mut self, reporter: Arc<dyn PlanReporter>, task: TaskRef) -> Self {
        self.reporter = Some(reporter);
        self.task = Some(task);
        self
    }

    pub fn hosting_mode(&self) -> HostingMode {
        self.hosting_mode
    }

    pub fn api_prefix(&self) -> &'static str {
        self.hosting_mode.api_prefix()
    }

    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Markdown link to the issue's browse page.
    pub fn link(&self, key: &str) -> String {
        issue_link(key, &self.server.url)
    }

    fn reporting_enabled(&self) -> bool {
        self.reporter.is_some() && self.task.is_some()
    }

    // ==================== SEARCH ====================

    /// Paginated search returning key → summary/status/assignee/link.
    pub async fn query_issues(&self, query: &str) -> JiraResult<BTreeMap<String, IssueSummary>> {
        require(query, "No JQL query provided.")?;

        let page_size = self.hosting_mode.search_page_size();
        let mut offset = 0;
        let mut issues = BTreeMap::new();

        while offset < MAX_RESULTS {
            let request = SearchRequest::new(query, ISSUE_LIST_FIELDS)
                .start_at(offset)
                .max_results(page_size);
            let page: SearchPage = self.search(&request, query).await?;
            if page.issues.is_empty() {
                break;
            }
            offset += page_size;

            for item in &page.issues {
                let summary = IssueSummary::from_search(item, self.server.browse_url(&item.key));
                issues.insert(item.key.clone(), summary);
            }
        }

        Ok(issues)
    }

    /// Single-page search that also forwards a plan record per hit when
    /// reporting is configured. Reporting failures are logged and returned,
    /// never raised.
    pub async fn query(&self, query: &str, quiet: bool) -> JiraResult<QueryOutcome> {
        require(query, "No JQL query provided.")?;

        let request = SearchRequest::new(query, QUERY_FIELDS)
            .expand("changelog")
            .max_results(MAX_RESULTS);
        let page: SearchPage = self.search(&request, query).await?;

        if !quiet {
            println!("#### Issues found");
        }

        let mut outcome = QueryOutcome::default();
        for item in &page.issues {
            let summary = item.fields.summary().to_string();
            if !quiet {
                println!("{}", issue_line(&item.key, &summary, &self.server.url));
            }
            outcome.issues.insert(item.key.clone(), summary);

            if let Err(e) = self.report_item(item).await {
                warn!(ticket = %item.key, error = %e, "Failed to report plan record");
                outcome.reporting_failures.push(ReportingFailure {
                    ticket: item.key.clone(),
                    error: e.to_string(),
                });
            }
        }

        if !quiet {
            println!();
        }
        Ok(outcome)
    }

    async fn report_item(&self, item: &SearchIssue) -> JiraResult<()> {
        let (Some(reporter), Some(task)) = (&self.reporter, &self.task) else {
            return Ok(());
        };
        let record = PlanRecord::from_search(
            item,
            &task.id,
            &self.server,
            self.credentials.username.as_deref(),
        )?;
        reporter.add_record(record, true).await
    }

    /// Re-query a single issue to refresh its plan record; failures are only logged.
    async fn report_best_effort(&self, key: &str) {
        if !self.reporting_enabled() {
            return;
        }
        match self.query(&format!("key={}", key), true).await {
            Ok(outcome) => {
                for failure in outcome.reporting_failures {
                    warn!(ticket = %failure.ticket, error = %failure.error, "Plan record not reported");
                }
            }
            Err(e) => warn!(ticket = %key, error = %e, "Failed to refresh plan record"),
        }
    }

    /// Paginated search returning key → (summary, status). Pages are fetched
    /// while the offset is below both the reported total and `MAX_RESULTS`.
    pub async fn check_query(&self, query: &str) -> JiraResult<BTreeMap<String, (String, String)>> {
        require(query, "No JQL query provided.")?;

        let mut start_at = 0;
        let mut total = None;
        let mut issues = BTreeMap::new();

        while start_at < MAX_RESULTS && total.map_or(true, |total| start_at < total) {
            let request = SearchRequest::new(query, CHECK_QUERY_FIELDS)
                .start_at(start_at)
                .max_results(CHECK_QUERY_PAGE_SIZE);
            let page: SearchPage = self.search(&request, query).await?;
            total = Some(page.total);
            if page.issues.is_empty() {
                break;
            }

            for item in &page.issues {
                let status = item.fields.status_name().unwrap_or_default().to_string();
                issues.insert(item.key.clone(), (item.fields.summary().to_string(), status));
            }
            start_at += CHECK_QUERY_PAGE_SIZE;
        }

        Ok(issues)
    }

    /// Each hit reduced to the requested fields. A field is read from the
    /// issue's top level, then from `fields`, else `null`.
    pub async fn query_for_fields(&self, query: &str, fields: &[&str]) -> JiraResult<Vec<Map<String, Value>>> {
        require(query, "No JQL query provided.")?;

        let request = SearchRequest::new(query, fields).max_results(MAX_RESULTS);
        let page: RawSearchPage = self.search(&request, query).await?;

        let issues = page
            .issues
            .iter()
            .map(|item| {
                fields
                    .iter()
                    .map(|field| {
                        let value = item
                            .get(*field)
                            .or_else(|| item.get("fields").and_then(|f| f.get(*field)))
                            .cloned()
                            .unwrap_or(Value::Null);
                        (field.to_string(), value)
                    })
                    .collect()
            })
            .collect();

        Ok(issues)
    }

    pub async fn query_for_issue_ids(&self, query: &str) -> JiraResult<Vec<String>> {
        let issues = self.query_for_fields(query, &["id"]).await?;
        Ok(issues
            .iter()
            .filter_map(|issue| match issue.get("id") {
                Some(Value::String(id)) => Some(id.clone()),
                Some(Value::Number(id)) => Some(id.to_string()),
                _ => None,
            })
            .collect())
    }

    async fn search<T: DeserializeOwned>(&self, request: &SearchRequest, query: &str) -> JiraResult<T> {
        let http = HttpRequest::post(self.api_path("/search")).json(request)?;
        let response = self.send(http).await?;
        expect_status(response, 200, || format!("Failed to execute search '{}' in JIRA.", query))?
            .json()
    }

    // ==================== CREATE ====================

    pub async fn create_issue(
        &self,
        project: &str,
        title: &str,
        description: &str,
        issue_type: &str,
    ) -> JiraResult<String> {
        require(project, "No project provided.")?;

        let content = json!({
            "fields": {
                "project": { "key": project },
                "summary": title,
                "description": description,
                "issuetype": { "name": issue_type }
            }
        });
        let request = HttpRequest::post(self.api_path("/issue")).json(&content)?;
        let key = self.submit_create(request, "Failed to create issue in JIRA.").await?;

        self.report_best_effort(&key).await;
        Ok(key)
    }

    /// Create from a caller-built JSON payload, sent as is.
    pub async fn create_issue_json(&self, payload: &str) -> JiraResult<String> {
        let request = HttpRequest::post(self.api_path("/issue")).body(payload);
        self.submit_create(request, "Failed to create issue in JIRA.").await
    }

    /// Create a sub-task of `parent_key`, resolving the sub-task issue type id
    /// from the project's create metadata first.
    pub async fn create_subtask(
        &self,
        project: &str,
        title: &str,
        description: &str,
        parent_key: &str,
        issue_type_name: Option<&str>,
    ) -> JiraResult<String> {
        require(project, "No project provided.")?;
        require(parent_key, "No parent issue provided.")?;

        let request = HttpRequest::get(self.api_path("/issue/createmeta"))
            .query("projectKeys", project)
            .query("expand", "projects.issuetypes.fields");
        let response = self.send(request).await?;
        let meta: CreateMeta = expect_status(response, 200, || {
            format!("Failed to get issue types for '{}' project.", project)
        })?
        .json()?;

        let type_id = meta
            .find_subtask_type(issue_type_name)
            .map(|t| t.id.clone())
            .ok_or_else(|| {
                JiraError::NotFound(format!(
                    "Failed to find issue type '{}' for '{}' project.",
                    issue_type_name.unwrap_or("sub-task"),
                    project
                ))
            })?;

        let content = json!({
            "fields": {
                "project": { "key": project },
                "parent": { "key": parent_key },
                "summary": title,
                "description": description,
                "issuetype": { "id": type_id }
            }
        });
        let request = HttpRequest::post(self.api_path("/issue")).json(&content)?;
        self.submit_create(request, "Failed to create subtask in JIRA.").await
    }

    async fn submit_create(&self, request: HttpRequest, failure: &str) -> JiraResult<String> {
        let response = self.send(request).await?;
        let created: CreatedIssue = expect_status(response, 201, || failure.to_string())?.json()?;

        info!(key = %created.key, "Created issue");
        println!("Created {} in JIRA.", self.link(&created.key));
        Ok(created.key)
    }

    // ==================== UPDATE ====================

    /// Transition to `new_status` (then comment), or apply a direct
    /// summary/comment update when no status is given. The issue must exist.
    pub async fn update_issue(
        &self,
        issue_id: &str,
        new_status: Option<&str>,
        comment: Option<&str>,
        new_summary: Option<&str>,
        add_record: bool,
    ) -> JiraResult<()> {
        self.check_issue(issue_id).await?;

        match new_status.filter(|s| !s.is_empty()) {
            Some(status) => {
                self.transition_issue(issue_id, status, new_summary).await?;
                if let Some(comment) = comment.filter(|c| !c.is_empty()) {
                    self.add_comment(issue_id, comment).await?;
                }
            }
            None => {
                let update = issue_update_data(new_summary, comment);
                self.put_update(issue_id, update, |link| {
                    format!(
                        "Unable to update issue {}. Please make sure the issue is not in a 'closed' state.",
                        link
                    )
                })
                .await?;
            }
        }

        info!(key = %issue_id, "Updated issue");
        println!("Updated {}", self.link(issue_id));
        if add_record {
            self.report_best_effort(issue_id).await;
        }
        println!();
        Ok(())
    }

    /// Add `new_value` to a named field, optionally commenting in the same update.
    pub async fn update_field(
        &self,
        issue_id: &str,
        field_name: &str,
        new_value: &str,
        comment: Option<&str>,
    ) -> JiraResult<()> {
        self.check_issue(issue_id).await?;

        let update = field_update_data(field_name, new_value, comment);
        self.put_update(issue_id, update, |link| {
            format!(
                "Unable to update issue {}. Please make sure the issue is not in a 'closed' state.",
                link
            )
        })
        .await?;

        println!(
            "Updated Issue: {} , Field: {}, Value: {}",
            self.link(issue_id),
            field_name,
            new_value
        );
        println!();
        Ok(())
    }

    /// Reassign to `account_id` and leave a comment, generated when none is given.
    pub async fn assign_issue(&self, issue_id: &str, account_id: &str, comment: Option<&str>) -> JiraResult<()> {
        self.check_issue(issue_id).await?;

        let request = HttpRequest::put(self.issue_path(issue_id, "/assignee"))
            .json(&json!({ "accountId": account_id }))?;
        let response = self.send(request).await?;
        expect_status(response, 204, || {
            format!(
                "Unable to assign issue {}. Please make sure the issue is not in a 'closed' state.",
                self.link(issue_id)
            )
        })?;

        let comment = match comment.filter(|c| !c.is_empty()) {
            Some(comment) => comment.to_string(),
            None => format!("{}{}", ASSIGNED_COMMENT_PREFIX, account_id),
        };
        self.add_comment(issue_id, &comment).await?;

        info!(key = %issue_id, account_id = %account_id, "Assigned issue");
        println!("Assigned {} to {}", self.link(issue_id), account_id);
        Ok(())
    }

    pub async fn add_comment(&self, issue_id: &str, body: &str) -> JiraResult<()> {
        require(issue_id, "No issue provided.")?;

        let request = HttpRequest::post(self.issue_path(issue_id, "/comment")).json(&json!({ "body": body }))?;
        let response = self.send(request).await?;
        expect_status(response, 201, || {
            format!(
                "Unable to comment issue {}. Make sure you have 'Add Comments' permission.",
                self.link(issue_id)
            )
        })?;
        Ok(())
    }

    /// Look up the first transition into `new_status` (case-insensitive) and
    /// execute it. A failure after the lookup is not compensated.
    async fn transition_issue(&self, issue_id: &str, new_status: &str, summary: Option<&str>) -> JiraResult<()> {
        let path = self.issue_path(issue_id, "/transitions");

        let request = HttpRequest::get(path.as_str()).query("expand", "transitions.fields");
        let response = self.send(request).await?;
        let transitions: TransitionsResponse = expect_status(response, 200, || {
            format!("Unable to find transitions for issue {}", self.link(issue_id))
        })?
        .json()?;

        let transition = transitions.find_by_target(new_status).ok_or_else(|| {
            JiraError::NotFound(format!(
                "Unable to find status {} for issue {}",
                new_status,
                self.link(issue_id)
            ))
        })?;

        let mut body = json!({ "transition": { "id": transition.id.clone() } });
        if let Some(summary) = summary {
            body["update"] = json!({ "summary": [{ "set": summary }] });
        }

        let request = HttpRequest::post(path.as_str())
            .query("expand", "transitions.fields")
            .json(&body)?;
        let response = self.send(request).await?;
        expect_status(response, 204, || {
            format!(
                "Unable to perform transition {} for issue {}",
                transition.label(),
                self.link(issue_id)
            )
        })?;
        Ok(())
    }

    async fn put_update<F>(&self, issue_id: &str, update: Map<String, Value>, failure: F) -> JiraResult<()>
    where
        F: FnOnce(String) -> String,
    {
        let request = HttpRequest::put(self.issue_path(issue_id, "")).json(&json!({ "update": update }))?;
        let response = self.send(request).await?;
        expect_status(response, 204, || failure(self.link(issue_id)))?;
        Ok(())
    }

    async fn check_issue(&self, issue_id: &str) -> JiraResult<()> {
        require(issue_id, "No issue provided.")?;

        let response = self.send(HttpRequest::get(self.issue_path(issue_id, ""))).await?;
        expect_status(response, 200, || format!("Unable to find issue {}", self.link(issue_id)))?;
        Ok(())
    }

    // ==================== PROJECTS & AGILE ====================

    pub async fn get_version_ids_for_project(&self, project_id: &str) -> JiraResult<Vec<String>> {
        require(project_id, "No project id provided.")?;

        let request = HttpRequest::get(self.api_path(&format!("/project/{}/versions", project_id)));
        let response = self.send(request).await?;
        let versions: Vec<ProjectVersion> = expect_status(response, 200, || {
            format!("Unable to find versions for project id {}", project_id)
        })?
        .json()?;

        let version_ids: Vec<String> = versions.into_iter().map(|v| v.id).collect();
        if version_ids.is_empty() {
            println!("No versions found for project id {}", project_id);
        } else {
            println!("{:?}\n", version_ids);
        }
        Ok(version_ids)
    }

    pub async fn get_boards(&self, board_name: &str) -> JiraResult<Vec<Board>> {
        require(board_name, "No board name provided.")?;

        let request = HttpRequest::get(format!("{}/board", AGILE_API_PREFIX)).query("name", board_name);
        let response = self.send(request).await?;
        let page: ValuesPage<Board> = expect_status(response, 200, || {
            format!("Unable to find boards for {}", board_name)
        })?
        .json()?;
        Ok(page.values)
    }

    /// Sprint name → id for `board`, printing one markdown table row per sprint.
    pub async fn get_all_sprints(&self, board: &Board) -> JiraResult<BTreeMap<String, u64>> {
        let request = HttpRequest::get(format!("{}/board/{}/sprint", AGILE_API_PREFIX, board.id));
        let response = self.send(request).await?;
        let page: ValuesPage<Sprint> = expect_status(response, 200, || {
            format!("Unable to find sprints for board {}", board.name)
        })?
        .json()?;

        let mut sprints = BTreeMap::new();
        for sprint in &page.values {
            println!("{}", sprint_row(sprint));
            sprints.insert(sprint.name.clone(), sprint.id);
        }
        Ok(sprints)
    }

    // ==================== PLUMBING ====================

    fn api_path(&self, suffix: &str) -> String {
        format!("{}{}", self.api_prefix(), suffix)
    }

    fn issue_path(&self, issue_id: &str, suffix: &str) -> String {
        self.api_path(&format!("/issue/{}{}", issue_id, suffix))
    }

    async fn send(&self, mut request: HttpRequest) -> JiraResult<HttpResponse> {
        if let Some(header) = self.auth.authorization_header() {
            request = request.header("Authorization", &header);
        }
        request = request.credentials(self.auth.request_credentials());

        debug!(method = %request.method, path = %request.path, "Sending Jira request");
        self.transport.send(request).await
    }
}

fn require(value: &str, message: &str) -> JiraResult<()> {
    if value.trim().is_empty() {
        Err(JiraError::InvalidInput(message.to_string()))
    } else {
        Ok(())
    }
}

fn expect_status<F>(response: HttpResponse, expected: u16, message: F) -> JiraResult<HttpResponse>
where
    F: FnOnce() -> String,
{
    if response.status == expected {
        Ok(response)
    } else {
        Err(JiraError::http(message(), response.status, response.body))
    }
}

fn comment_op(comment: &str) -> Value {
    json!([{ "add": { "body": comment } }])
}

/// `update` payload for a direct summary/comment edit.
fn issue_update_data(summary: Option<&str>, comment: Option<&str>) -> Map<String, Value> {
    let mut update = Map::new();
    if let Some(comment) = comment.filter(|c| !c.is_empty()) {
        update.insert("comment".to_string(), comment_op(comment));
    }
    if let Some(summary) = summary {
        update.insert("summary".to_string(), json!([{ "set": summary }]));
    }
    update
}

/// `update` payload adding `{"name": value}` to a field.
fn field_update_data(field_name: &str, value: &str, comment: Option<&str>) -> Map<String, Value> {
    let mut update = Map::new();
    if !field_name.is_empty() {
        update.insert(field_name.to_string(), json!([{ "add": { "name": value } }]));
    }
    if let Some(comment) = comment.filter(|c| !c.is_empty()) {
        update.insert("comment".to_string(), comment_op(comment));
    }
    update
}
