pub const CONFIG_FILE: &str = ".jira-cli-config.json";

pub const CLOUD_API_PREFIX: &str = "/rest/api/latest";
pub const SERVER_API_PREFIX: &str = "/rest/api/2";
pub const AGILE_API_PREFIX: &str = "/rest/agile/1.0";

pub const JSON_CONTENT_TYPE: &str = "application/json";

// Hard cap on search offsets and single-page result sizes.
pub const MAX_RESULTS: u32 = 1000;

pub const SERVER_PAGE_SIZE: u32 = 1000;
pub const CLOUD_PAGE_SIZE: u32 = 100;
pub const CHECK_QUERY_PAGE_SIZE: u32 = 100;

pub const UNASSIGNED: &str = "Unassigned";
pub const NOT_DEFINED: &str = "not defined";

pub const ASSIGNED_COMMENT_PREFIX: &str = "Issue assigned by XLRelease to AccountID: ";

// Jira serializes timestamps as e.g. 2024-03-05T14:22:10.123+0000
pub const JIRA_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

pub const QUERY_FIELDS: &[&str] = &["summary", "issuetype", "updated", "status", "reporter"];
pub const ISSUE_LIST_FIELDS: &[&str] = &["summary", "status", "assignee"];
pub const CHECK_QUERY_FIELDS: &[&str] = &["summary", "status"];
