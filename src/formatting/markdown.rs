//! Markdown snippets the orchestration host renders in task output.

use crate::constants::NOT_DEFINED;
use crate::models::Sprint;

/// `[KEY](base/browse/KEY)`
pub fn issue_link(key: &str, base_url: &str) -> String {
    format!("[{0}]({1}/browse/{0})", key, base_url.trim_end_matches('/'))
}

pub fn issue_line(key: &str, summary: &str, base_url: &str) -> String {
    format!("* {} - {}", issue_link(key, base_url), summary)
}

pub fn sprint_row(sprint: &Sprint) -> String {
    format!(
        "| {} | {} | {} | {} |",
        sprint.name,
        sprint.id,
        sprint.start_date.as_deref().unwrap_or(NOT_DEFINED),
        sprint.end_date.as_deref().unwrap_or(NOT_DEFINED)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_link() {
        assert_eq!(
            issue_link("PROJ-1", "https://jira.example.com/"),
            "[PROJ-1](https://jira.example.com/browse/PROJ-1)"
        );
    }

    #[test]
    fn test_issue_line() {
        assert_eq!(
            issue_line("PROJ-2", "Fix login", "https://jira.example.com"),
            "* [PROJ-2](https://jira.example.com/browse/PROJ-2) - Fix login"
        );
    }

    #[test]
    fn test_sprint_row_with_missing_dates() {
        let sprint = Sprint {
            id: 12,
            name: "Sprint 4".to_string(),
            start_date: Some("2024-01-01T09:00:00.000Z".to_string()),
            end_date: None,
        };
        assert_eq!(
            sprint_row(&sprint),
            "| Sprint 4 | 12 | 2024-01-01T09:00:00.000Z | not defined |"
        );
    }
}
