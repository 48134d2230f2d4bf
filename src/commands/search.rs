use clap::ArgMatches;
use colored::*;

use super::required;
use crate::cli_context::CliContext;
use crate::error::JiraResult;
use crate::formatting::print_check_results;

pub async fn handle_query(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let jql = required(matches, "jql", "JQL query")?;
    let outcome = client.query(jql, matches.get_flag("quiet")).await?;

    if !outcome.reporting_failures.is_empty() {
        eprintln!(
            "{} {} plan record(s) could not be reported:",
            "⚠".yellow(),
            outcome.reporting_failures.len()
        );
        for failure in &outcome.reporting_failures {
            eprintln!("  {} {}", failure.ticket.blue(), failure.error.dimmed());
        }
    }
    Ok(())
}

pub async fn handle_check(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let jql = required(matches, "jql", "JQL query")?;
    let issues = client.check_query(jql).await?;
    print_check_results(&issues);
    Ok(())
}

pub async fn handle_ids(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let jql = required(matches, "jql", "JQL query")?;
    for id in client.query_for_issue_ids(jql).await? {
        println!("{}", id);
    }
    Ok(())
}

pub async fn handle_fields(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let jql = required(matches, "jql", "JQL query")?;
    let fields: Vec<&str> = matches
        .get_many::<String>("field")
        .map(|values| values.map(|s| s.as_str()).collect())
        .unwrap_or_default();

    let issues = client.query_for_fields(jql, &fields).await?;
    println!("{}", serde_json::to_string_pretty(&issues)?);
    Ok(())
}
