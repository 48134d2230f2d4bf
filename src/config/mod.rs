pub mod config;
pub mod server;

pub use config::{apply_env_overrides, config_path, load_config, save_config, Config};
pub use server::{Credentials, ProxyConfig, ServerConfig};
