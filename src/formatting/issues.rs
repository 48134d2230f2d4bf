use std::collections::BTreeMap;

use colored::*;

use super::utils::*;
use crate::constants::UNASSIGNED;
use crate::models::{Board, IssueSummary};

pub fn format_status_color(status: &str) -> ColoredString {
    match status.to_lowercase().as_str() {
        "in progress" | "in review" => status.yellow(),
        "done" | "closed" | "resolved" => status.green(),
        "blocked" => status.red(),
        "backlog" => status.dimmed(),
        _ => status.normal(),
    }
}

fn format_assignee(assignee: &str) -> ColoredString {
    if assignee == UNASSIGNED {
        assignee.dimmed()
    } else {
        extract_first_name(assignee).green()
    }
}

pub fn print_issue_summaries(issues: &BTreeMap<String, IssueSummary>, format: &str) {
    if issues.is_empty() {
        println!("{}", "No issues found.".dimmed());
        return;
    }

    match format {
        "json" => match serde_json::to_string_pretty(issues) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "Failed to render JSON:".red(), e),
        },
        "table" => {
            println!("{}", "─".repeat(100).dimmed());
            println!(
                "{:<14} {:<46} {:<16} {:<20}",
                "Key".bold(),
                "Summary".bold(),
                "Status".bold(),
                "Assignee".bold()
            );
            println!("{}", "─".repeat(100).dimmed());

            for issue in issues.values() {
                println!(
                    "{:<14} {:<46} {:<16} {:<20}",
                    issue.key.blue(),
                    truncate(&issue.summary, 46),
                    format_status_color(&issue.status),
                    format_assignee(&issue.assignee)
                );
            }
            println!("{}", "─".repeat(100).dimmed());
        }
        _ => {
            let mut grouped: BTreeMap<&str, Vec<&IssueSummary>> = BTreeMap::new();
            for issue in issues.values() {
                grouped.entry(issue.status.as_str()).or_default().push(issue);
            }

            for (status, group) in &grouped {
                println!("\n{} ({})", format_status_color(status).bold(), group.len());
                println!("{}", "─".repeat(50).dimmed());
                for issue in group {
                    println!(
                        "{} - {} ({})",
                        issue.key.blue(),
                        issue.summary,
                        format_assignee(&issue.assignee)
                    );
                    println!("    {}", issue.link.bright_black());
                }
            }
        }
    }
}

pub fn print_check_results(issues: &BTreeMap<String, (String, String)>) {
    if issues.is_empty() {
        println!("{}", "No issues found.".dimmed());
        return;
    }
    for (key, (summary, status)) in issues {
        println!("{} {} [{}]", key.blue(), summary, format_status_color(status));
    }
}

pub fn print_board_list(boards: &[Board]) {
    if boards.is_empty() {
        println!("{}", "No boards found.".dimmed());
        return;
    }
    println!("{}", "Boards:".bold());
    for board in boards {
        println!(
            "  {} - {} {}",
            board.id.to_string().cyan(),
            board.name,
            board.board_type.as_deref().unwrap_or_default().dimmed()
        );
    }
}
