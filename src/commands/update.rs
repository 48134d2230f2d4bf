use clap::ArgMatches;

use super::{optional, required};
use crate::cli_context::CliContext;
use crate::error::{JiraError, JiraResult};

pub async fn handle_update(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let key = required(matches, "key", "Issue key")?;
    let status = optional(matches, "status");
    let comment = optional(matches, "comment");
    let summary = optional(matches, "summary");

    if status.is_none() && comment.is_none() && summary.is_none() {
        return Err(JiraError::InvalidInput(
            "No fields to update. Provide --status, --comment or --summary.".to_string(),
        ));
    }

    client
        .update_issue(key, status, comment, summary, !matches.get_flag("no-record"))
        .await
}

pub async fn handle_field(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let key = required(matches, "key", "Issue key")?;
    let field = required(matches, "field", "Field name")?;
    let value = required(matches, "value", "Field value")?;

    client
        .update_field(key, field, value, optional(matches, "comment"))
        .await
}

pub async fn handle_assign(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let key = required(matches, "key", "Issue key")?;
    let account_id = required(matches, "account-id", "Account id")?;

    client
        .assign_issue(key, account_id, optional(matches, "comment"))
        .await
}

pub async fn handle_comment(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let key = required(matches, "key", "Issue key")?;
    let body = required(matches, "body", "Comment body")?;

    client.add_comment(key, body).await?;
    println!("Commented on {}", client.link(key));
    Ok(())
}
