use serde::{Deserialize, Serialize};

/// Connection settings for one Jira instance.
///
/// The username, password and API token held here are the server-level
/// credentials. Per-client credentials live in [`Credentials`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl ServerConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_api_token(mut self, api_token: impl Into<String>) -> Self {
        self.api_token = Some(api_token.into());
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn browse_url(&self, key: &str) -> String {
        format!("{}/browse/{}", self.base_url(), key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    pub host: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    // NTLM domain, not supported by the reqwest transport
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl ProxyConfig {
    pub fn proxy_url(&self) -> String {
        let host = if self.host.contains("://") {
            self.host.clone()
        } else {
            format!("http://{}", self.host)
        };
        match self.port {
            Some(port) => format!("{}:{}", host, port),
            None => host,
        }
    }
}

/// Optional per-client credentials, layered over the server config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_token: Option<String>,
}

impl Credentials {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn token(username: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: None,
            api_token: Some(api_token.into()),
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            password: Some(password.into()),
            api_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_url_strips_trailing_slash() {
        let server = ServerConfig::new("https://jira.example.com/");
        assert_eq!(
            server.browse_url("PROJ-1"),
            "https://jira.example.com/browse/PROJ-1"
        );
    }

    #[test]
    fn test_proxy_url() {
        let proxy = ProxyConfig {
            host: "proxy.local".to_string(),
            port: Some(3128),
            ..ProxyConfig::default()
        };
        assert_eq!(proxy.proxy_url(), "http://proxy.local:3128");

        let proxy = ProxyConfig {
            host: "https://proxy.local".to_string(),
            ..ProxyConfig::default()
        };
        assert_eq!(proxy.proxy_url(), "https://proxy.local");
    }

    #[test]
    fn test_server_config_serde_camel_case() {
        let json = r#"{"url":"https://jira.example.com","apiToken":"tok","username":"me"}"#;
        let server: ServerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(server.api_token.as_deref(), Some("tok"));
        assert_eq!(server.username.as_deref(), Some("me"));
        assert!(server.proxy.is_none());
    }
}
