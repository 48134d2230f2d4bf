use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `POST /search` JQL request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub jql: String,
    pub start_at: u32,
    pub fields: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub expand: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
}

impl SearchRequest {
    pub fn new(jql: &str, fields: &[&str]) -> Self {
        Self {
            jql: jql.to_string(),
            start_at: 0,
            fields: fields.iter().map(|f| f.to_string()).collect(),
            expand: Vec::new(),
            max_results: None,
        }
    }

    pub fn start_at(mut self, start_at: u32) -> Self {
        self.start_at = start_at;
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    pub fn expand(mut self, expand: &str) -> Self {
        self.expand.push(expand.to_string());
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<SearchIssue>,
}

/// Raw search hit. Only `key` is guaranteed; the remaining fields depend on
/// what the search asked for.
#[derive(Debug, Deserialize)]
pub struct SearchIssue {
    pub key: String,
    #[serde(default)]
    pub fields: IssueFields,
    #[serde(default)]
    pub changelog: Option<Changelog>,
}

#[derive(Debug, Default, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub status: Option<NamedRef>,
    #[serde(default)]
    pub assignee: Option<UserRef>,
    #[serde(default)]
    pub reporter: Option<UserRef>,
    #[serde(default)]
    pub issuetype: Option<NamedRef>,
    #[serde(default)]
    pub updated: Option<String>,
}

impl IssueFields {
    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }

    pub fn status_name(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.name.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Changelog {
    #[serde(default)]
    pub histories: Vec<History>,
}

#[derive(Debug, Deserialize)]
pub struct History {
    #[serde(default)]
    pub author: Option<UserRef>,
    #[serde(default)]
    pub created: Option<String>,
}

/// Search hits kept as untyped JSON, for caller-chosen field lists.
#[derive(Debug, Deserialize)]
pub struct RawSearchPage {
    #[serde(default)]
    pub issues: Vec<Value>,
}
