use tracing::{debug, info};

use super::transport::{HttpRequest, HttpTransport, ReqwestTransport};
use crate::auth::{basic_header, BasicCredentials};
use crate::config::ServerConfig;
use crate::constants::{CLOUD_API_PREFIX, SERVER_API_PREFIX};
use crate::error::{JiraError, JiraResult, ProbeFailure};

/// Checks that the server answers `GET /application-properties`.
///
/// A 403 counts as reachable: the credentials were accepted but lack
/// administrative permission. Returns the status that was received.
pub async fn probe_connection(server: &ServerConfig) -> JiraResult<u16> {
    let transport = ReqwestTransport::new(server)?;
    probe_with_transport(server, &transport).await
}

pub async fn probe_with_transport(server: &ServerConfig, transport: &dyn HttpTransport) -> JiraResult<u16> {
    let token = server.api_token.as_deref().filter(|t| !t.is_empty());
    let password = server.password.as_deref().filter(|p| !p.is_empty());
    let username = server.username.clone().unwrap_or_default();

    let request = match (token, password) {
        (Some(token), _) => HttpRequest::get(format!("{}/application-properties", CLOUD_API_PREFIX))
            .header("Authorization", &basic_header(&username, token)),
        (None, Some(password)) => {
            HttpRequest::get(format!("{}/application-properties", SERVER_API_PREFIX)).credentials(Some(
                BasicCredentials {
                    username,
                    password: password.to_string(),
                },
            ))
        }
        (None, None) => HttpRequest::get("/application-properties"),
    };

    debug!(url = %server.url, path = %request.path, "Probing Jira connectivity");
    let response = transport.send(request).await?;

    match response.status {
        200 | 403 => {
            info!(status = response.status, url = %server.url, "Jira server reachable");
            Ok(response.status)
        }
        status => Err(JiraError::Connectivity {
            status,
            reason: ProbeFailure::from_status(status),
        }),
    }
}
