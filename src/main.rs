use std::process;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use colored::*;

use jira_cli::commands::{agile, auth, create, issues, probe, search, update};
use jira_cli::error::JiraResult;
use jira_cli::logging;

fn jql_arg() -> Arg {
    Arg::new("jql")
        .value_name("JQL")
        .help("JQL query")
        .required(true)
}

fn key_arg() -> Arg {
    Arg::new("key")
        .value_name("KEY")
        .help("Issue key, e.g. PROJ-123")
        .required(true)
}

fn comment_arg() -> Arg {
    Arg::new("comment")
        .long("comment")
        .short('c')
        .value_name("TEXT")
        .help("Comment to add to the issue")
}

fn build_cli() -> Command {
    Command::new("jira")
        .about("Jira CLI - Query, create, update, transition, assign and comment on Jira issues")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("username")
                .long("username")
                .short('u')
                .value_name("USER")
                .help("Username for this invocation (overrides the server credentials)")
                .global(true),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .value_name("PASSWORD")
                .help("Password for basic authentication against a self-hosted server")
                .global(true),
        )
        .arg(
            Arg::new("api-token")
                .long("api-token")
                .value_name("TOKEN")
                .help("API token for Atlassian Cloud")
                .global(true),
        )
        .arg(
            Arg::new("report-file")
                .long("report-file")
                .value_name("PATH")
                .help("Append plan records for queried issues to this JSON lines file")
                .global(true),
        )
        .arg(
            Arg::new("task-id")
                .long("task-id")
                .value_name("ID")
                .help("Task that plan records are attached to")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Mirror debug logs to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("auth")
                .about("Configure the Jira server")
                .arg(Arg::new("url").long("url").value_name("URL").help("Jira base URL"))
                .arg(
                    Arg::new("server-username")
                        .long("server-username")
                        .value_name("USER")
                        .help("Server-level username"),
                )
                .arg(
                    Arg::new("server-password")
                        .long("server-password")
                        .value_name("PASSWORD")
                        .help("Server-level password"),
                )
                .arg(
                    Arg::new("server-token")
                        .long("server-token")
                        .value_name("TOKEN")
                        .help("Server-level API token"),
                )
                .arg(
                    Arg::new("proxy-host")
                        .long("proxy-host")
                        .value_name("HOST")
                        .help("HTTP proxy host"),
                )
                .arg(
                    Arg::new("proxy-port")
                        .long("proxy-port")
                        .value_name("PORT")
                        .help("HTTP proxy port")
                        .value_parser(value_parser!(u16)),
                )
                .arg(
                    Arg::new("show")
                        .long("show")
                        .help("Show the current configuration")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("probe").about("Check connectivity to the configured server"))
        .subcommand(
            Command::new("issues")
                .about("List issues matching a JQL query")
                .arg(jql_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_name("FORMAT")
                        .help("Output format: simple, table, json")
                        .default_value("simple"),
                ),
        )
        .subcommand(
            Command::new("query")
                .about("Run a JQL query and report plan records")
                .arg(jql_arg())
                .arg(
                    Arg::new("quiet")
                        .long("quiet")
                        .short('q')
                        .help("Do not print the issue listing")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Summary and status of every issue matching a JQL query")
                .arg(jql_arg()),
        )
        .subcommand(
            Command::new("ids")
                .about("Ids of the issues matching a JQL query")
                .arg(jql_arg()),
        )
        .subcommand(
            Command::new("fields")
                .about("Selected fields of the issues matching a JQL query")
                .arg(jql_arg())
                .arg(
                    Arg::new("field")
                        .long("field")
                        .value_name("FIELD")
                        .help("Field to extract (repeatable)")
                        .action(ArgAction::Append)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("create")
                .about("Create issues")
                .subcommand_required(true)
                .subcommand(
                    Command::new("issue")
                        .about("Create a new issue")
                        .arg(
                            Arg::new("project")
                                .long("project")
                                .short('p')
                                .value_name("KEY")
                                .required(true),
                        )
                        .arg(
                            Arg::new("title")
                                .long("title")
                                .short('t')
                                .value_name("TITLE")
                                .required(true),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .value_name("TEXT"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .value_name("TYPE")
                                .default_value("Task"),
                        ),
                )
                .subcommand(
                    Command::new("json")
                        .about("Create an issue from a JSON payload")
                        .arg(
                            Arg::new("file")
                                .value_name("FILE")
                                .help("Path to the JSON payload, or - for stdin")
                                .required(true),
                        ),
                )
                .subcommand(
                    Command::new("subtask")
                        .about("Create a sub-task under an existing issue")
                        .arg(
                            Arg::new("project")
                                .long("project")
                                .short('p')
                                .value_name("KEY")
                                .required(true),
                        )
                        .arg(
                            Arg::new("parent")
                                .long("parent")
                                .value_name("KEY")
                                .required(true),
                        )
                        .arg(
                            Arg::new("title")
                                .long("title")
                                .short('t')
                                .value_name("TITLE")
                                .required(true),
                        )
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .value_name("TEXT"),
                        )
                        .arg(
                            Arg::new("type-name")
                                .long("type-name")
                                .value_name("NAME")
                                .help("Sub-task issue type name (defaults to the first sub-task type)"),
                        ),
                ),
        )
        .subcommand(
            Command::new("update")
                .about("Transition, comment on or retitle an issue")
                .arg(key_arg())
                .arg(
                    Arg::new("status")
                        .long("status")
                        .short('s')
                        .value_name("STATUS")
                        .help("Target status name (case-insensitive)"),
                )
                .arg(comment_arg())
                .arg(
                    Arg::new("summary")
                        .long("summary")
                        .value_name("TEXT")
                        .help("New summary"),
                )
                .arg(
                    Arg::new("no-record")
                        .long("no-record")
                        .help("Skip refreshing the plan record")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("field")
                .about("Add a value to an issue field")
                .arg(key_arg())
                .arg(Arg::new("field").value_name("FIELD").required(true))
                .arg(Arg::new("value").value_name("VALUE").required(true))
                .arg(comment_arg()),
        )
        .subcommand(
            Command::new("assign")
                .about("Assign an issue to an account")
                .arg(key_arg())
                .arg(Arg::new("account-id").value_name("ACCOUNT_ID").required(true))
                .arg(comment_arg()),
        )
        .subcommand(
            Command::new("comment")
                .about("Comment on an issue")
                .arg(key_arg())
                .arg(Arg::new("body").value_name("BODY").required(true)),
        )
        .subcommand(
            Command::new("versions")
                .about("Version ids of a project")
                .arg(Arg::new("project-id").value_name("PROJECT_ID").required(true)),
        )
        .subcommand(
            Command::new("boards")
                .about("Agile boards matching a name")
                .arg(Arg::new("name").value_name("NAME").required(true)),
        )
        .subcommand(
            Command::new("sprints")
                .about("Sprints of the boards matching a name")
                .arg(Arg::new("board").value_name("BOARD").required(true)),
        )
}

async fn dispatch(matches: &ArgMatches) -> JiraResult<()> {
    match matches.subcommand() {
        Some(("auth", sub)) => auth::handle_auth(sub).await,
        Some(("probe", sub)) => probe::handle_probe(sub).await,
        Some(("issues", sub)) => issues::handle_issues(sub).await,
        Some(("query", sub)) => search::handle_query(sub).await,
        Some(("check", sub)) => search::handle_check(sub).await,
        Some(("ids", sub)) => search::handle_ids(sub).await,
        Some(("fields", sub)) => search::handle_fields(sub).await,
        Some(("create", sub)) => match sub.subcommand() {
            Some(("issue", m)) => create::handle_create_issue(m).await,
            Some(("json", m)) => create::handle_create_json(m).await,
            Some(("subtask", m)) => create::handle_create_subtask(m).await,
            _ => unreachable!("subcommand_required"),
        },
        Some(("update", sub)) => update::handle_update(sub).await,
        Some(("field", sub)) => update::handle_field(sub).await,
        Some(("assign", sub)) => update::handle_assign(sub).await,
        Some(("comment", sub)) => update::handle_comment(sub).await,
        Some(("versions", sub)) => agile::handle_versions(sub).await,
        Some(("boards", sub)) => agile::handle_boards(sub).await,
        Some(("sprints", sub)) => agile::handle_sprints(sub).await,
        _ => unreachable!("subcommand_required"),
    }
}

#[tokio::main]
async fn main() {
    let matches = build_cli().get_matches();

    if let Err(e) = logging::init_logging(matches.get_flag("verbose")) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }
    std::panic::set_hook(Box::new(|info| {
        logging::log_panic_info(info);
        eprintln!("{}", info);
    }));

    if let Err(e) = dispatch(&matches).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(path) = logging::get_log_file_path() {
            eprintln!("{}", format!("See {} for details.", path.display()).dimmed());
        }
        process::exit(1);
    }
}
