use clap::ArgMatches;

use super::required;
use crate::cli_context::CliContext;
use crate::error::JiraResult;
use crate::formatting::print_issue_summaries;

pub async fn handle_issues(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let jql = required(matches, "jql", "JQL query")?;
    let format = matches
        .get_one::<String>("format")
        .map(|s| s.as_str())
        .unwrap_or("simple");

    let issues = client.query_issues(jql).await?;
    print_issue_summaries(&issues, format);
    Ok(())
}
