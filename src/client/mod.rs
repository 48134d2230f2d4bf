pub mod jira_client;
pub mod probe;
pub mod transport;

pub use jira_client::{JiraClient, QueryOutcome};
pub use probe::{probe_connection, probe_with_transport};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
