use clap::ArgMatches;
use colored::*;

use crate::cli_context::CliContext;
use crate::client::probe_connection;
use crate::error::JiraResult;

pub async fn handle_probe(matches: &ArgMatches) -> JiraResult<()> {
    let context = CliContext::from_matches(matches)?;
    let server = context.server_config()?;

    let status = probe_connection(&server).await?;
    if status == 403 {
        println!(
            "{} {} is reachable, but the configured user lacks permission to read application properties.",
            "⚠".yellow(),
            server.url
        );
    } else {
        println!("{} {} is reachable.", "✅".green(), server.url);
    }
    Ok(())
}
