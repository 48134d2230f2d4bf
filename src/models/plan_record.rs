use chrono::{DateTime, Utc};
use serde::Serialize;

use super::search::{History, SearchIssue};
use crate::config::ServerConfig;
use crate::constants::JIRA_TIMESTAMP_FORMAT;
use crate::error::{JiraError, JiraResult};

/// Summary of a tracked issue handed to the reporting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub target_id: String,
    pub ticket: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub ticket_url: String,
    pub server_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_user: Option<String>,
}

impl PlanRecord {
    /// Builds the record for one `query` hit.
    ///
    /// `updated_by` is the author of the most recent changelog history
    /// (latest `created`), falling back to the reporter when there is no
    /// history. `server_user` is the client username when one was supplied,
    /// else the server-level username.
    pub fn from_search(
        item: &SearchIssue,
        target_id: &str,
        server: &ServerConfig,
        username: Option<&str>,
    ) -> JiraResult<Self> {
        let fields = &item.fields;

        let updated_date = fields
            .updated
            .as_deref()
            .filter(|u| !u.is_empty())
            .map(parse_jira_timestamp)
            .transpose()?;

        let histories = item
            .changelog
            .as_ref()
            .map(|c| c.histories.as_slice())
            .unwrap_or_default();
        let updated_by = match latest_history(histories) {
            Some(history) => history.author.as_ref().and_then(|a| a.display_name.clone()),
            None => fields.reporter.as_ref().and_then(|r| r.display_name.clone()),
        };

        let server_user = username
            .filter(|u| !u.is_empty())
            .map(str::to_string)
            .or_else(|| server.username.clone());

        Ok(Self {
            target_id: target_id.to_string(),
            ticket: item.key.clone(),
            title: fields.summary().to_string(),
            ticket_type: fields.issuetype.as_ref().map(|t| t.name.clone()),
            updated_date,
            updated_by,
            status: fields.status_name().map(str::to_string),
            ticket_url: server.browse_url(&item.key),
            server_url: server.url.clone(),
            server_user,
        })
    }
}

/// History with the latest parsable `created`; the last entry when none parse.
fn latest_history(histories: &[History]) -> Option<&History> {
    histories
        .iter()
        .filter_map(|history| {
            let created = history.created.as_deref()?;
            parse_jira_timestamp(created).ok().map(|at| (at, history))
        })
        .max_by_key(|(at, _)| *at)
        .map(|(_, history)| history)
        .or_else(|| histories.last())
}

/// Parses Jira's `2024-03-05T14:22:10.123+0000` timestamps, falling back to RFC 3339.
pub fn parse_jira_timestamp(value: &str) -> JiraResult<DateTime<Utc>> {
    DateTime::parse_from_str(value, JIRA_TIMESTAMP_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| JiraError::ParseError(format!("Invalid timestamp '{}': {}", value, e)))
}
