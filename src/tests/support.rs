use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::client::{HttpRequest, HttpResponse, HttpTransport, JiraClient};
use crate::config::{Credentials, ServerConfig};
use crate::error::{JiraError, JiraResult};
use crate::models::PlanRecord;
use crate::reporting::{PlanReporter, TaskRef};

pub const BASE_URL: &str = "https://jira.example.com";

/// Replays scripted responses in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, status: u16, body: Value) -> &Self {
        self.push_raw(status, &body.to_string())
    }

    pub fn push_raw(&self, status: u16, body: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(HttpResponse::new(status, body));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request(&self, index: usize) -> HttpRequest {
        self.requests()[index].clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> JiraResult<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses.lock().unwrap().pop_front().ok_or_else(|| {
            JiraError::Unknown(format!("no scripted response for {} {}", request.method, request.path))
        })
    }
}

/// Collects plan records, failing for the tickets listed in `fail_for`.
#[derive(Default)]
pub struct RecordingReporter {
    pub records: Mutex<Vec<(PlanRecord, bool)>>,
    pub fail_for: Vec<String>,
}

impl RecordingReporter {
    pub fn failing_for(tickets: &[&str]) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_for: tickets.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn records(&self) -> Vec<(PlanRecord, bool)> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlanReporter for RecordingReporter {
    async fn add_record(&self, record: PlanRecord, merge: bool) -> JiraResult<()> {
        if self.fail_for.contains(&record.ticket) {
            return Err(JiraError::Reporting(format!("rejected {}", record.ticket)));
        }
        self.records.lock().unwrap().push((record, merge));
        Ok(())
    }
}

pub fn server() -> Arc<ServerConfig> {
    Arc::new(ServerConfig::new(BASE_URL))
}

pub fn cloud_client(transport: &Arc<MockTransport>) -> JiraClient {
    JiraClient::with_transport(
        Some(server()),
        Credentials::token("me@example.com", "tok"),
        transport.clone(),
    )
    .unwrap()
}

pub fn server_client(transport: &Arc<MockTransport>) -> JiraClient {
    JiraClient::with_transport(
        Some(server()),
        Credentials::basic("me", "secret"),
        transport.clone(),
    )
    .unwrap()
}

pub fn reporting_client(transport: &Arc<MockTransport>, reporter: Arc<RecordingReporter>) -> JiraClient {
    cloud_client(transport).with_reporting(reporter, TaskRef::new("task-42"))
}
