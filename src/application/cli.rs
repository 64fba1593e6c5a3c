#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::future::Future;
use std::io;
use std::path;
use std::sync::Arc;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use chrono::Local;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use serde_json::json;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::chat;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Comment;
use crate::domain::models::CommentScope;
use crate::domain::models::CreateCommentParams;
use crate::domain::models::CreateTaskParams;
use crate::domain::models::Credential;
use crate::domain::models::Failure;
use crate::domain::models::ResourceClient;
use crate::domain::models::Task;
use crate::domain::models::TaskScope;
use crate::domain::models::UpdateCommentParams;
use crate::domain::models::UpdateTaskParams;
use crate::domain::services::ChatbotClient;
use crate::domain::services::CommentClient;
use crate::domain::services::CommentStore;
use crate::domain::services::ConversationSession;
use crate::domain::services::Credentials;
use crate::domain::services::Gateway;
use crate::domain::services::GatewayRef;
use crate::domain::services::ListStore;
use crate::domain::services::Refetch;
use crate::domain::services::TaskClient;
use crate::domain::services::TaskStore;
use crate::infrastructure::storage::FileStore;
use crate::infrastructure::storage::StorageManager;
use crate::infrastructure::transports::HttpTransport;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

fn format_task(task: &Task) -> String {
    let status = if task.active { "active" } else { "done" };
    let mut res = format!("- (ID: {}) {} [{status}]", task.id, task.title);

    if !task.description.is_empty() {
        let mut line = task.description.split('\n').next().unwrap_or_default().to_string();
        if line.chars().count() >= 70 {
            line = format!("{}...", line.chars().take(67).collect::<String>());
        }
        res = format!("{res}, {line}");
    }

    return res;
}

fn format_comment(comment: &Comment) -> String {
    let mut res = format!("- (ID: {})", comment.id);
    if !comment.created_at.is_empty() {
        res = format!("{res} {}", comment.created_at);
    }

    return format!("{res}, {}", comment.content);
}

fn print_lines(lines: Vec<String>, empty_text: &str) {
    if lines.is_empty() {
        println!("{empty_text}");
    } else {
        println!("{}", lines.join("\n"));
    }
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn gateway() -> Result<GatewayRef> {
    let credentials = Credentials::new(StorageManager::from_config()?);
    return Ok(Arc::new(Gateway::new(
        Box::<HttpTransport>::default(),
        credentials,
    )));
}

fn account_id() -> Result<String> {
    let account_id = Config::get(ConfigKey::AccountID);
    if account_id.trim().is_empty() {
        bail!(format!(
            "No account selected. Pass --{} or set TASKDESK_ACCOUNT_ID.",
            ConfigKey::AccountID
        ));
    }

    return Ok(account_id);
}

fn required_string(matches: &ArgMatches, id: &str) -> String {
    return matches
        .get_one::<String>(id)
        .map(|e| return e.to_string())
        .unwrap_or_default();
}

fn confirm_delete(matches: &ArgMatches, noun: &str, id: &str) -> Result<bool> {
    if matches.get_flag("yes") {
        return Ok(true);
    }

    let res = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Delete {noun} {id}?"))
        .default(false)
        .interact()?;

    return Ok(res);
}

fn progress_label(is_loading: bool, is_saving: bool) -> Option<&'static str> {
    if is_saving {
        return Some("Saving...");
    }
    if is_loading {
        return Some("Loading...");
    }

    return None;
}

/// Runs a store operation while echoing the store's loading and saving
/// state to stderr.
async fn with_progress<C: ResourceClient, T>(
    store: &ListStore<C>,
    op: impl Future<Output = T>,
) -> T {
    let mut rx = store.subscribe();
    tokio::pin!(op);

    let mut shown = None;
    loop {
        tokio::select! {
            res = &mut op => return res,
            changed = rx.changed() => {
                if changed.is_err() {
                    return op.await;
                }

                let label = progress_label(store.is_loading(), store.is_saving());
                if let Some(indicator) = label {
                    if shown != label {
                        eprintln!("{}", Paint::new(indicator).dimmed());
                    }
                }
                shown = label;
            }
        }
    }
}

fn explain(err: Failure) -> anyhow::Error {
    if err.is_unauthorized() {
        return anyhow!(
            "{err}\nThe server did not accept the access token. Run `taskdesk auth login --{} <TOKEN>` to store a new one.",
            ConfigKey::Token
        );
    }

    return anyhow::Error::new(err);
}

fn report_refetch(refetch: Refetch) {
    if let Refetch::Failed(err) = refetch {
        eprintln!(
            "{}",
            Paint::yellow(format!(
                "The change was saved, but the list could not be reloaded: {}",
                explain(err)
            ))
        );
    }
}

fn login_credential(token: &str) -> Credential {
    return Credential::new(token.trim())
        .with_metadata("saved_at", json!(Local::now().to_rfc3339()));
}

async fn run_tasks(matches: &ArgMatches) -> Result<()> {
    let store = TaskStore::new(
        TaskClient::new(gateway()?),
        TaskScope::new(&account_id()?),
    );

    match matches.subcommand() {
        Some(("list", _)) => {
            with_progress(&store, store.reload())
                .await
                .map_err(explain)?;
        }
        Some(("create", create_matches)) => {
            let params = CreateTaskParams {
                title: required_string(create_matches, "title"),
                description: required_string(create_matches, "description"),
            };
            let refetch = with_progress(&store, store.create(params))
                .await
                .map_err(explain)?;
            println!("{}", Paint::green("Created task"));
            report_refetch(refetch);
        }
        Some(("update", update_matches)) => {
            let id = required_string(update_matches, "id");
            let params = UpdateTaskParams {
                title: required_string(update_matches, "title"),
                description: required_string(update_matches, "description"),
            };
            let refetch = with_progress(&store, store.update(&id, params))
                .await
                .map_err(explain)?;
            println!("{}", Paint::green(format!("Updated task {id}")));
            report_refetch(refetch);
        }
        Some(("delete", delete_matches)) => {
            let id = required_string(delete_matches, "id");
            if !confirm_delete(delete_matches, "task", &id)? {
                return Ok(());
            }
            let refetch = with_progress(&store, store.delete(&id))
                .await
                .map_err(explain)?;
            println!("{}", Paint::green(format!("Deleted task {id}")));
            report_refetch(refetch);
        }
        _ => {
            subcommand_tasks().print_long_help()?;
            return Ok(());
        }
    }

    print_lines(
        store.snapshot().items.iter().map(format_task).collect(),
        "There are no tasks for this account yet.",
    );

    return Ok(());
}

async fn run_comments(matches: &ArgMatches) -> Result<()> {
    let task_id = required_string(matches, "task-id");
    let store = CommentStore::new(
        CommentClient::new(gateway()?),
        CommentScope::new(&account_id()?, &task_id),
    );

    match matches.subcommand() {
        Some(("list", _)) => {
            with_progress(&store, store.reload())
                .await
                .map_err(explain)?;
        }
        Some(("create", create_matches)) => {
            let params = CreateCommentParams {
                content: required_string(create_matches, "content"),
            };
            let refetch = with_progress(&store, store.create(params))
                .await
                .map_err(explain)?;
            println!("{}", Paint::green("Created comment"));
            report_refetch(refetch);
        }
        Some(("update", update_matches)) => {
            let id = required_string(update_matches, "id");
            let params = UpdateCommentParams {
                content: required_string(update_matches, "content"),
            };
            let refetch = with_progress(&store, store.update(&id, params))
                .await
                .map_err(explain)?;
            println!("{}", Paint::green(format!("Updated comment {id}")));
            report_refetch(refetch);
        }
        Some(("delete", delete_matches)) => {
            let id = required_string(delete_matches, "id");
            if !confirm_delete(delete_matches, "comment", &id)? {
                return Ok(());
            }
            let refetch = with_progress(&store, store.delete(&id))
                .await
                .map_err(explain)?;
            println!("{}", Paint::green(format!("Deleted comment {id}")));
            report_refetch(refetch);
        }
        _ => {
            subcommand_comments().print_long_help()?;
            return Ok(());
        }
    }

    print_lines(
        store.snapshot().items.iter().map(format_comment).collect(),
        "There are no comments on this task yet.",
    );

    return Ok(());
}

fn run_auth(matches: &ArgMatches) -> Result<()> {
    // Login and logout always go to the credentials file, even when a token
    // override is active for this process.
    let file_path = path::PathBuf::from(Config::get(ConfigKey::CredentialsFile));
    let credentials = Credentials::new(Arc::new(FileStore::new(file_path)));

    match matches.subcommand() {
        Some(("login", _)) => {
            let token = Config::get(ConfigKey::Token);
            if token.trim().is_empty() {
                bail!(format!(
                    "No token given. Pass --{} or set TASKDESK_TOKEN.",
                    ConfigKey::Token
                ));
            }
            credentials.save(&login_credential(&token))?;
            println!("Saved credential to {}", Config::get(ConfigKey::CredentialsFile));
        }
        Some(("logout", _)) => {
            credentials.clear()?;
            println!("Removed stored credential");
        }
        Some(("status", _)) => {
            let from_flag = !Config::get(ConfigKey::Token).is_empty();
            if from_flag {
                println!("Using the token passed with --{}", ConfigKey::Token);
            } else if let Some(credential) = credentials.load() {
                let mut line = format!(
                    "Logged in, credential stored at {}",
                    Config::get(ConfigKey::CredentialsFile)
                );
                let saved_at = credential
                    .metadata
                    .get("saved_at")
                    .and_then(|e| return e.as_str());
                if let Some(saved_at) = saved_at {
                    line = format!("{line} on {saved_at}");
                }
                println!("{line}");
            } else {
                println!("Not logged in");
            }
        }
        _ => {
            subcommand_auth().print_long_help()?;
        }
    }

    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        )
        .subcommand(
            Command::new("keys").about("List all config keys as strings.")
        );
}

fn subcommand_auth() -> Command {
    return Command::new("auth")
        .about("Manage the stored access token.")
        .arg_required_else_help(true)
        .subcommand(Command::new("login").about(format!(
            "Stores the token given with --{} in the credentials file.",
            ConfigKey::Token
        )))
        .subcommand(Command::new("logout").about("Removes the stored token."))
        .subcommand(Command::new("status").about("Reports whether a token is available."));
}

fn arg_id(noun: &str) -> Arg {
    return Arg::new("id")
        .short('i')
        .long("id")
        .num_args(1)
        .help(format!("{noun} ID"))
        .required(true);
}

fn arg_yes() -> Arg {
    return Arg::new("yes")
        .short('y')
        .long("yes")
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt.");
}

fn arg_title() -> Arg {
    return Arg::new("title")
        .long("title")
        .num_args(1)
        .help("Task title.")
        .required(true);
}

fn arg_description() -> Arg {
    return Arg::new("description")
        .short('d')
        .long("description")
        .num_args(1)
        .help("Task description.")
        .required(true);
}

fn arg_content() -> Arg {
    return Arg::new("content")
        .long("content")
        .num_args(1)
        .help("Comment text.")
        .required(true);
}

fn subcommand_tasks() -> Command {
    return Command::new("tasks")
        .about("List and edit the tasks of an account.")
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List all tasks of the account."))
        .subcommand(
            Command::new("create")
                .about("Create a task.")
                .arg(arg_title())
                .arg(arg_description()),
        )
        .subcommand(
            Command::new("update")
                .about("Replace the title and description of a task.")
                .arg(arg_id("Task"))
                .arg(arg_title())
                .arg(arg_description()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a task.")
                .arg(arg_id("Task"))
                .arg(arg_yes()),
        );
}

fn subcommand_comments() -> Command {
    return Command::new("comments")
        .about("List and edit the comments on a task.")
        .arg_required_else_help(true)
        .arg(
            Arg::new("task-id")
                .short('t')
                .long("task-id")
                .env("TASKDESK_TASK_ID")
                .num_args(1)
                .help("Task owning the comments.")
                .required(true),
        )
        .subcommand(Command::new("list").about("List all comments on the task."))
        .subcommand(
            Command::new("create")
                .about("Add a comment.")
                .arg(arg_content()),
        )
        .subcommand(
            Command::new("update")
                .about("Replace the text of a comment.")
                .arg(arg_id("Comment"))
                .arg(arg_content()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a comment.")
                .arg(arg_id("Comment"))
                .arg(arg_yes()),
        );
}

pub fn build() -> Command {
    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("taskdesk")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .subcommand(subcommand_auth())
        .subcommand(Command::new("chat").about("Start a conversation with the assistant."))
        .subcommand(subcommand_comments())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(Command::new("log-path").about("Output path to debug log file generated when running with environment variable RUST_LOG=taskdesk").hide(true))
        .subcommand(subcommand_tasks())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("TASKDESK_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        )
        .arg(
            Arg::new(ConfigKey::ApiURL.to_string())
                .short('u')
                .long(ConfigKey::ApiURL.to_string())
                .env("TASKDESK_API_URL")
                .num_args(1)
                .help(format!("Base URL of the task service API. [default: {}]", Config::default(ConfigKey::ApiURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::AccountID.to_string())
                .short('a')
                .long(ConfigKey::AccountID.to_string())
                .env("TASKDESK_ACCOUNT_ID")
                .num_args(1)
                .help("Account whose tasks and comments are managed.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::RequestTimeout.to_string())
                .long(ConfigKey::RequestTimeout.to_string())
                .env("TASKDESK_REQUEST_TIMEOUT")
                .num_args(1)
                .help(format!("Time to wait in milliseconds before giving up on a request. [default: {}]", Config::default(ConfigKey::RequestTimeout)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::CredentialsFile.to_string())
                .long(ConfigKey::CredentialsFile.to_string())
                .env("TASKDESK_CREDENTIALS_FILE")
                .num_args(1)
                .help(format!("Where the access token is stored. [default: {}]", Config::default(ConfigKey::CredentialsFile)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::Token.to_string())
                .long(ConfigKey::Token.to_string())
                .env("TASKDESK_TOKEN")
                .num_args(1)
                .hide_env_values(true)
                .help("Access token. Used for this run only unless saved with `auth login`.")
                .global(true),
        );
}

pub async fn parse() -> Result<()> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("auth", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            run_auth(subcmd_matches)?;
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            let session = ConversationSession::new(ChatbotClient::new(gateway()?));
            chat::start(session).await?;
        }
        Some(("comments", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            run_comments(subcmd_matches).await?;
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
            }
            Some(("keys", _)) => {
                println!("{}", ConfigKey::VARIANTS.join("\n"));
            }
            _ => {
                subcommand_config().print_long_help()?;
            }
        },
        Some(("log-path", _)) => {
            println!("{}", Config::log_dir().join("debug.log").to_string_lossy());
        }
        Some(("tasks", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            run_tasks(subcmd_matches).await?;
        }
        _ => {
            build().print_long_help()?;
        }
    }

    return Ok(());
}
