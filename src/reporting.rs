use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{JiraError, JiraResult};
use crate::models::PlanRecord;

/// External collaborator that receives plan records for the orchestration host.
///
/// Failures returned here never abort the Jira operation that triggered the
/// report; the client logs them and hands them back as [`ReportingFailure`]s.
#[async_trait]
pub trait PlanReporter: Send + Sync {
    async fn add_record(&self, record: PlanRecord, merge: bool) -> JiraResult<()>;
}

/// The originating task that plan records are attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRef {
    pub id: String,
}

impl TaskRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportingFailure {
    pub ticket: String,
    pub error: String,
}

#[derive(Serialize)]
struct ReportLine<'a> {
    merge: bool,
    record: &'a PlanRecord,
}

/// Appends each record as one JSON line to a file.
pub struct JsonLinesReporter {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesReporter {
    pub fn open(path: impl AsRef<Path>) -> JiraResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PlanReporter for JsonLinesReporter {
    async fn add_record(&self, record: PlanRecord, merge: bool) -> JiraResult<()> {
        let line = serde_json::to_string(&ReportLine {
            merge,
            record: &record,
        })?;
        let mut file = self
            .file
            .lock()
            .map_err(|_| JiraError::Reporting("report file lock poisoned".to_string()))?;
        writeln!(file, "{}", line)
            .map_err(|e| JiraError::Reporting(format!("{}: {}", self.path.display(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn record(ticket: &str) -> PlanRecord {
        PlanRecord {
            target_id: "task-1".to_string(),
            ticket: ticket.to_string(),
            title: "Title".to_string(),
            ticket_type: None,
            updated_date: None,
            updated_by: Some("Someone".to_string()),
            status: Some("Open".to_string()),
            ticket_url: format!("https://jira.example.com/browse/{}", ticket),
            server_url: "https://jira.example.com".to_string(),
            server_user: None,
        }
    }

    #[tokio::test]
    async fn test_json_lines_reporter_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.jsonl");
        let reporter = JsonLinesReporter::open(&path).unwrap();

        reporter.add_record(record("PROJ-1"), true).await.unwrap();
        reporter.add_record(record("PROJ-2"), false).await.unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["merge"], true);
        assert_eq!(lines[0]["record"]["ticket"], "PROJ-1");
        assert_eq!(lines[0]["record"]["targetId"], "task-1");
        assert_eq!(lines[1]["record"]["ticketUrl"], "https://jira.example.com/browse/PROJ-2");
        assert!(lines[1]["record"].get("ticketType").is_none());
    }
}
