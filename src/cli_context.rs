use std::path::PathBuf;
use std::sync::Arc;

use clap::ArgMatches;

use crate::client::JiraClient;
use crate::config::{load_config, save_config, Config, Credentials, ServerConfig};
use crate::error::{JiraError, JiraResult};
use crate::reporting::{JsonLinesReporter, TaskRef};

/// Central context for CLI operations, managing configuration and client instances
pub struct CliContext {
    config: Config,
    credentials: Credentials,
    report_file: Option<PathBuf>,
    task_id: Option<String>,
    client: Option<Arc<JiraClient>>,
}

impl CliContext {
    /// Load context from saved configuration
    pub fn load() -> JiraResult<Self> {
        CliContextBuilder::new().build()
    }

    /// Load context, layering the global CLI flags over the saved configuration
    pub fn from_matches(matches: &ArgMatches) -> JiraResult<Self> {
        let arg = |name: &str| matches.try_get_one::<String>(name).ok().flatten().cloned();

        let mut builder = CliContextBuilder::new().with_credentials(Credentials {
            username: arg("username"),
            password: arg("password"),
            api_token: arg("api-token"),
        });
        if let Some(path) = arg("report-file") {
            builder = builder.with_report_file(PathBuf::from(path));
        }
        if let Some(task_id) = arg("task-id") {
            builder = builder.with_task_id(task_id);
        }
        builder.build()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn server_config(&self) -> JiraResult<ServerConfig> {
        self.config.to_server_config()
    }

    /// Get or create the client for this context
    pub fn client(&mut self) -> JiraResult<Arc<JiraClient>> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let server = Arc::new(self.server_config()?);
        let mut client = JiraClient::new(Some(server), self.credentials.clone())?;

        match (&self.report_file, &self.task_id) {
            (Some(path), Some(task_id)) => {
                let reporter = Arc::new(JsonLinesReporter::open(path)?);
                client = client.with_reporting(reporter, TaskRef::new(task_id.clone()));
            }
            (None, None) => {}
            _ => {
                return Err(JiraError::InvalidInput(
                    "--report-file and --task-id must be given together".to_string(),
                ))
            }
        }

        let client = Arc::new(client);
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Merge `update` into the saved configuration and persist it
    pub fn save_server(&mut self, update: Config) -> JiraResult<()> {
        let mut config = self.config.clone();
        if update.url.is_some() {
            config.url = update.url;
        }
        if update.username.is_some() {
            config.username = update.username;
        }
        if update.password.is_some() {
            config.password = update.password;
        }
        if update.api_token.is_some() {
            config.api_token = update.api_token;
        }
        if update.proxy.is_some() {
            config.proxy = update.proxy;
        }

        save_config(&config)?;
        self.config = config;
        self.client = None;
        Ok(())
    }

    /// Check if context knows which server to talk to
    pub fn has_server(&self) -> bool {
        self.server_config().is_ok()
    }
}

/// Builder pattern for creating CLI contexts with specific configurations
pub struct CliContextBuilder {
    config: Option<Config>,
    credentials: Credentials,
    report_file: Option<PathBuf>,
    task_id: Option<String>,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            credentials: Credentials::none(),
            report_file: None,
            task_id: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_report_file(mut self, path: PathBuf) -> Self {
        self.report_file = Some(path);
        self
    }

    pub fn with_task_id(mut self, task_id: String) -> Self {
        self.task_id = Some(task_id);
        self
    }

    pub fn build(self) -> JiraResult<CliContext> {
        let config = match self.config {
            Some(config) => config,
            None => load_config()?,
        };

        Ok(CliContext {
            config,
            credentials: self.credentials,
            report_file: self.report_file,
            task_id: self.task_id,
            client: None,
        })
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
