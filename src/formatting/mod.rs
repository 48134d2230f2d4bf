pub mod issues;
pub mod markdown;
pub mod utils;

pub use issues::{format_status_color, print_board_list, print_check_results, print_issue_summaries};
pub use markdown::{issue_line, issue_link, sprint_row};
pub use utils::{extract_first_name, truncate};
