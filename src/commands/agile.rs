use clap::ArgMatches;
use colored::*;

use super::required;
use crate::cli_context::CliContext;
use crate::error::{JiraError, JiraResult};
use crate::formatting::print_board_list;

pub async fn handle_versions(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let project_id = required(matches, "project-id", "Project id")?;
    client.get_version_ids_for_project(project_id).await?;
    Ok(())
}

pub async fn handle_boards(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let name = required(matches, "name", "Board name")?;
    let boards = client.get_boards(name).await?;
    print_board_list(&boards);
    Ok(())
}

pub async fn handle_sprints(matches: &ArgMatches) -> JiraResult<()> {
    let mut context = CliContext::from_matches(matches)?;
    let client = context.client()?;

    let name = required(matches, "board", "Board name")?;
    let boards = client.get_boards(name).await?;
    if boards.is_empty() {
        return Err(JiraError::NotFound(format!("No board named '{}'", name)));
    }

    for board in &boards {
        println!("\n{} {} ({})", "▸".cyan(), board.name.bold(), board.id);
        println!("| Name | Id | Start | End |");
        println!("|---|---|---|---|");
        let sprints = client.get_all_sprints(board).await?;
        if sprints.is_empty() {
            println!("{}", "No sprints found.".dimmed());
        }
    }
    Ok(())
}
