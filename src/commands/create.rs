use std::fs;
use std::io::Read;

use clap::ArgMatches;
use colored::*;

use super::{optional, required};
use crate::cli_context::CliContext;
use crate::error::{ErrorContext, JiraResult};

pub async fn handle_create_issue(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let project = required(matches, "project", "Project key")?;
    let title = required(matches, "title", "Title")?;
    let description = optional(matches, "description").unwrap_or_default();
    let issue_type = optional(matches, "type").unwrap_or("Task");

    let key = client.create_issue(project, title, description, issue_type).await?;

    println!("{} {}", "✅".green(), "Issue created successfully!".green().bold());
    println!("{}: {}", "Key".bold(), key.bright_blue().bold());
    println!("{}: {}", "URL".bold(), client.server().browse_url(&key).bright_black());
    Ok(())
}

pub async fn handle_create_json(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let source = required(matches, "file", "JSON file")?;
    let payload = read_payload(source)?;

    let key = client.create_issue_json(&payload).await?;
    println!("{}: {}", "Key".bold(), key.bright_blue().bold());
    Ok(())
}

/// Reads a create payload from a file, or stdin for `-`, and checks it is JSON.
fn read_payload(source: &str) -> JiraResult<String> {
    let payload = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Reading issue JSON from stdin")?;
        buffer
    } else {
        fs::read_to_string(source).with_context(|| format!("Reading issue JSON from {}", source))?
    };

    // Catch malformed payloads before they reach the server
    serde_json::from_str::<serde_json::Value>(&payload)?;
    Ok(payload)
}

pub async fn handle_create_subtask(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let project = required(matches, "project", "Project key")?;
    let parent = required(matches, "parent", "Parent issue key")?;
    let title = required(matches, "title", "Title")?;
    let description = optional(matches, "description").unwrap_or_default();
    let type_name = optional(matches, "type-name");

    let key = client
        .create_subtask(project, title, description, parent, type_name)
        .await?;

    println!("{} {}", "✅".green(), "Sub-task created successfully!".green().bold());
    println!("{}: {} (parent {})", "Key".bold(), key.bright_blue().bold(), parent.cyan());
    Ok(())
}
