use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::config::{Credentials, ServerConfig};
use crate::constants::{CLOUD_API_PREFIX, CLOUD_PAGE_SIZE, SERVER_API_PREFIX, SERVER_PAGE_SIZE};

/// Atlassian-hosted (token auth, "latest" API) or self-hosted (basic auth, API v2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostingMode {
    Cloud,
    Server,
}

impl HostingMode {
    pub fn api_prefix(&self) -> &'static str {
        match self {
            HostingMode::Cloud => CLOUD_API_PREFIX,
            HostingMode::Server => SERVER_API_PREFIX,
        }
    }

    pub fn search_page_size(&self) -> u32 {
        match self {
            HostingMode::Cloud => CLOUD_PAGE_SIZE,
            HostingMode::Server => SERVER_PAGE_SIZE,
        }
    }
}

impl fmt::Display for HostingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostingMode::Cloud => f.write_str("CLOUD"),
            HostingMode::Server => f.write_str("SERVER"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// How every request of one client authenticates.
///
/// Exactly one credential source is used per request: either an
/// `Authorization` header or request-level basic credentials, never both.
/// Token credentials take precedence over passwords at every level.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// Client username + API token, sent as a Basic header.
    UserToken { username: String, token: String },
    /// Client username + password, sent as request-level basic credentials.
    UserPassword { username: String, password: String },
    /// Server-level API token, sent as a Basic header.
    ServerToken { username: String, token: String },
    /// Whatever request-level credentials the server config carries, if any.
    ServerCredentials(Option<BasicCredentials>),
}

impl AuthScheme {
    pub fn resolve(server: &ServerConfig, credentials: &Credentials) -> Self {
        let present = |v: &Option<String>| v.as_deref().filter(|s| !s.is_empty()).map(str::to_string);

        let username = present(&credentials.username);
        if let (Some(username), Some(token)) = (username.clone(), present(&credentials.api_token)) {
            return AuthScheme::UserToken { username, token };
        }
        if let (Some(username), Some(password)) = (username, present(&credentials.password)) {
            return AuthScheme::UserPassword { username, password };
        }
        if let Some(token) = present(&server.api_token) {
            return AuthScheme::ServerToken {
                username: present(&server.username).unwrap_or_default(),
                token,
            };
        }

        let server_credentials = match (present(&server.username), present(&server.password)) {
            (Some(username), Some(password)) => Some(BasicCredentials { username, password }),
            _ => None,
        };
        AuthScheme::ServerCredentials(server_credentials)
    }

    pub fn hosting_mode(&self) -> HostingMode {
        match self {
            AuthScheme::UserToken { .. } | AuthScheme::ServerToken { .. } => HostingMode::Cloud,
            AuthScheme::UserPassword { .. } | AuthScheme::ServerCredentials(_) => {
                HostingMode::Server
            }
        }
    }

    pub fn authorization_header(&self) -> Option<String> {
        match self {
            AuthScheme::UserToken { username, token }
            | AuthScheme::ServerToken { username, token } => Some(basic_header(username, token)),
            _ => None,
        }
    }

    pub fn request_credentials(&self) -> Option<BasicCredentials> {
        match self {
            AuthScheme::UserPassword { username, password } => Some(BasicCredentials {
                username: username.clone(),
                password: password.clone(),
            }),
            AuthScheme::ServerCredentials(credentials) => credentials.clone(),
            _ => None,
        }
    }
}

impl fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::UserToken { username, .. } => write!(f, "UserToken({})", username),
            AuthScheme::UserPassword { username, .. } => write!(f, "UserPassword({})", username),
            AuthScheme::ServerToken { username, .. } => write!(f, "ServerToken({})", username),
            AuthScheme::ServerCredentials(credentials) => {
                write!(f, "ServerCredentials({:?})", credentials)
            }
        }
    }
}

pub fn basic_header(username: &str, secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, secret)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> ServerConfig {
        ServerConfig::new("https://jira.example.com")
    }

    #[test]
    fn test_user_token_is_cloud() {
        let scheme = AuthScheme::resolve(&server(), &Credentials::token("me@example.com", "tok"));
        assert_eq!(scheme.hosting_mode(), HostingMode::Cloud);
        assert_eq!(scheme.hosting_mode().api_prefix(), "/rest/api/latest");
        assert_eq!(
            scheme.authorization_header().as_deref(),
            Some("Basic bWVAZXhhbXBsZS5jb206dG9r")
        );
        assert!(scheme.request_credentials().is_none());
    }

    #[test]
    fn test_user_password_is_server() {
        let scheme = AuthScheme::resolve(&server(), &Credentials::basic("me", "secret"));
        assert_eq!(scheme.hosting_mode(), HostingMode::Server);
        assert_eq!(scheme.hosting_mode().api_prefix(), "/rest/api/2");
        assert!(scheme.authorization_header().is_none());
        assert_eq!(
            scheme.request_credentials(),
            Some(BasicCredentials {
                username: "me".to_string(),
                password: "secret".to_string()
            })
        );
    }

    #[test]
    fn test_token_wins_over_password() {
        let credentials = Credentials {
            username: Some("me".to_string()),
            password: Some("secret".to_string()),
            api_token: Some("tok".to_string()),
        };
        let scheme = AuthScheme::resolve(&server(), &credentials);
        assert!(matches!(scheme, AuthScheme::UserToken { .. }));
        assert!(scheme.request_credentials().is_none());
    }

    #[test]
    fn test_client_password_wins_over_server_token() {
        let server = server().with_username("svc").with_api_token("server-tok");
        let scheme = AuthScheme::resolve(&server, &Credentials::basic("me", "secret"));
        assert!(matches!(scheme, AuthScheme::UserPassword { .. }));
        assert_eq!(scheme.hosting_mode(), HostingMode::Server);
        assert!(scheme.authorization_header().is_none());
        assert_eq!(
            scheme.request_credentials().map(|c| c.username),
            Some("me".to_string())
        );
    }

    #[test]
    fn test_server_token_is_cloud() {
        let server = server().with_username("svc").with_api_token("server-tok");
        let scheme = AuthScheme::resolve(&server, &Credentials::none());
        assert_eq!(scheme.hosting_mode(), HostingMode::Cloud);
        assert_eq!(
            scheme.authorization_header(),
            Some(basic_header("svc", "server-tok"))
        );
    }

    #[test]
    fn test_token_without_username_falls_through() {
        let credentials = Credentials {
            api_token: Some("tok".to_string()),
            ..Credentials::default()
        };
        let server = server().with_username("svc").with_password("pw");
        let scheme = AuthScheme::resolve(&server, &credentials);
        assert_eq!(scheme.hosting_mode(), HostingMode::Server);
        assert_eq!(
            scheme.request_credentials().map(|c| c.username),
            Some("svc".to_string())
        );
    }

    #[test]
    fn test_no_credentials_is_server_without_header() {
        let scheme = AuthScheme::resolve(&server(), &Credentials::none());
        assert_eq!(scheme, AuthScheme::ServerCredentials(None));
        assert_eq!(scheme.hosting_mode(), HostingMode::Server);
        assert!(scheme.authorization_header().is_none());
    }

    #[test]
    fn test_page_size_by_hosting_mode() {
        assert_eq!(HostingMode::Server.search_page_size(), 1000);
        assert_eq!(HostingMode::Cloud.search_page_size(), 100);
    }
}
