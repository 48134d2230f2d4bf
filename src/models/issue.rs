use serde::{Deserialize, Serialize};

use super::search::SearchIssue;
use crate::constants::UNASSIGNED;

/// One row of a `query_issues` result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueSummary {
    pub key: String,
    pub summary: String,
    pub status: String,
    pub assignee: String,
    pub link: String,
}

impl IssueSummary {
    pub fn from_search(item: &SearchIssue, browse_url: String) -> Self {
        let assignee = item
            .fields
            .assignee
            .as_ref()
            .and_then(|a| a.display_name.clone())
            .unwrap_or_else(|| UNASSIGNED.to_string());

        Self {
            key: item.key.clone(),
            summary: item.fields.summary().to_string(),
            status: item.fields.status_name().unwrap_or_default().to_string(),
            assignee,
            link: browse_url,
        }
    }
}

/// Response of `POST /issue`.
#[derive(Debug, Deserialize)]
pub struct CreatedIssue {
    pub key: String,
}
