use clap::ArgMatches;
use colored::*;

use super::optional;
use crate::cli_context::CliContext;
use crate::client::probe_connection;
use crate::config::{config_path, Config, ProxyConfig};
use crate::error::JiraResult;

fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

pub async fn handle_auth(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::load()?;

    if matches.get_flag("show") {
        let config = context.config();
        println!("{}: {}", "URL".bold(), config.url.as_deref().unwrap_or("not configured"));
        println!("{}: {}", "Username".bold(), config.username.as_deref().unwrap_or("-"));
        println!(
            "{}: {}",
            "Password".bold(),
            config.password.as_deref().map(|_| "****").unwrap_or("-")
        );
        println!(
            "{}: {}",
            "API token".bold(),
            config.api_token.as_deref().map(mask).unwrap_or_else(|| "-".to_string())
        );
        if let Some(proxy) = &config.proxy {
            println!("{}: {}", "Proxy".bold(), proxy.proxy_url());
        }
        return Ok(());
    }

    let proxy = optional(matches, "proxy-host").map(|host| ProxyConfig {
        host: host.to_string(),
        port: matches.get_one::<u16>("proxy-port").copied(),
        ..ProxyConfig::default()
    });
    let update = Config {
        url: optional(matches, "url").map(str::to_string),
        username: optional(matches, "server-username").map(str::to_string),
        password: optional(matches, "server-password").map(str::to_string),
        api_token: optional(matches, "server-token").map(str::to_string),
        proxy,
    };

    if update == Config::default() {
        println!("Usage: jira auth --url <URL> [--server-username <USER>] [--server-token <TOKEN> | --server-password <PASSWORD>] or jira auth --show");
        return Ok(());
    }

    context.save_server(update)?;
    println!("Configuration saved to {}", config_path()?.display());

    let server = context.server_config()?;
    match probe_connection(&server).await {
        Ok(status) => println!("{} Connected to {} (HTTP {})", "✅".green(), server.url, status),
        Err(e) => println!("{} Failed to reach {}: {}", "❌".red(), server.url, e),
    }
    Ok(())
}
