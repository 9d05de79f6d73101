//! Skibidict administrative CLI.
//!
//! # Responsibility
//! - Bootstrap API users and print their one-time token.
//! - Inspect the audit log without going through the HTTP API.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;
use skibidict_core::{init_logging, AuditService, AuthService, Config, Store};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "skibidict")]
#[command(about = "Skibidict dictionary administration")]
#[command(version)]
struct Cli {
    /// Database file (overrides SKIBIDICT_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log info-level events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an API user and print its token
    Adduser {
        /// User name
        name: String,
    },
    /// Show audit log entries, newest first
    Logs {
        /// Maximum entries (default 100, at most 300)
        #[arg(short, long)]
        limit: Option<u32>,
        /// Number of newest entries to skip
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();

    let level = if cli.verbose || config.log_dir.is_some() {
        config.log_level.as_str()
    } else {
        "warn"
    };
    if let Err(err) = init_logging(level, config.log_dir.as_deref()) {
        eprintln!("warning: logging disabled: {err}");
    }

    let mut stdout = std::io::stdout().lock();
    match run(cli, &config, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &Config, out: &mut impl Write) -> Result<()> {
    let db_path = cli.db.unwrap_or_else(|| config.db_path.clone());
    debug!("event=cli_start module=cli status=ok db_path={}", db_path.display());
    let store = Store::open(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;

    execute(cli.command, store, out)
}

fn execute(command: Commands, store: Store, out: &mut impl Write) -> Result<()> {
    match command {
        Commands::Adduser { name } => {
            let user = AuthService::new(store)
                .bootstrap_user(&name)
                .with_context(|| format!("failed to create user '{name}'"))?;
            writeln!(out, "created user '{}'", user.name)?;
            writeln!(out, "token: {}", user.token)?;
        }
        Commands::Logs { limit, offset } => {
            let page = AuditService::new(store)
                .list_logs(limit, offset)
                .context("failed to read audit log")?;
            if page.items.is_empty() {
                writeln!(out, "no log entries")?;
            }
            for entry in page.items {
                writeln!(
                    out,
                    "{} #{} {} {} {}",
                    entry.timestamp, entry.id, entry.user, entry.action, entry.detail
                )?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{execute, Cli, Commands};
    use clap::Parser;
    use skibidict_core::{AuthService, Store, WordInput, WordService};

    fn run_to_string(command: Commands, store: &Store) -> anyhow::Result<String> {
        let mut out = Vec::new();
        execute(command, store.clone(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn adduser_prints_name_and_working_token() {
        let store = Store::open_in_memory().unwrap();

        let output = run_to_string(
            Commands::Adduser {
                name: "alice".to_string(),
            },
            &store,
        )
        .unwrap();

        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("created user 'alice'"));
        let token = lines.next().unwrap().strip_prefix("token: ").unwrap();
        assert_eq!(token.len(), 64);

        let user = AuthService::new(store).resolve_user(token).unwrap().unwrap();
        assert_eq!(user.name, "alice");
    }

    #[test]
    fn duplicate_adduser_fails_without_creating_user() {
        let store = Store::open_in_memory().unwrap();
        let adduser = || Commands::Adduser {
            name: "alice".to_string(),
        };

        run_to_string(adduser(), &store).unwrap();
        let err = run_to_string(adduser(), &store).unwrap_err();

        assert!(format!("{err:#}").contains("failed to create user 'alice'"));
        let users: i64 = store
            .read(|conn| conn.query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0)))
            .unwrap();
        assert_eq!(users, 1);
    }

    #[test]
    fn logs_lists_newest_first() {
        let store = Store::open_in_memory().unwrap();
        let user = AuthService::new(store.clone())
            .create_user("alice", "tok")
            .unwrap();
        let words = WordService::new(store.clone());
        let word = words
            .create_word(user.id, &WordInput::new().spelling("yeet"))
            .unwrap();
        words.delete_word(user.id, word.id).unwrap();

        let output = run_to_string(
            Commands::Logs {
                limit: Some(1),
                offset: 0,
            },
            &store,
        )
        .unwrap();

        assert_eq!(output.lines().count(), 1);
        assert!(output.contains("alice delete_word id="));
    }

    #[test]
    fn empty_log_says_so() {
        let store = Store::open_in_memory().unwrap();
        let output = run_to_string(
            Commands::Logs {
                limit: None,
                offset: 0,
            },
            &store,
        )
        .unwrap();
        assert_eq!(output.trim(), "no log entries");
    }

    #[test]
    fn parses_global_db_flag_and_subcommands() {
        let cli =
            Cli::try_parse_from(["skibidict", "--db", "x.db", "logs", "--limit", "5"]).unwrap();
        assert_eq!(cli.db.unwrap().to_str(), Some("x.db"));
        assert!(matches!(
            cli.command,
            Commands::Logs {
                limit: Some(5),
                offset: 0
            }
        ));

        let cli = Cli::try_parse_from(["skibidict", "adduser", "bob"]).unwrap();
        assert!(matches!(cli.command, Commands::Adduser { ref name } if name == "bob"));
    }
}
