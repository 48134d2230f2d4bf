pub mod agile;
pub mod auth;
pub mod create;
pub mod issues;
pub mod probe;
pub mod search;
pub mod update;

use clap::ArgMatches;

use crate::error::{JiraError, JiraResult};

/// Required string argument, as an `InvalidInput` error when absent.
pub(crate) fn required<'a>(matches: &'a ArgMatches, name: &str, what: &str) -> JiraResult<&'a String> {
    matches
        .get_one::<String>(name)
        .ok_or_else(|| JiraError::InvalidInput(format!("{} is required", what)))
}

pub(crate) fn optional<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches.get_one::<String>(name).map(|s| s.as_str())
}
