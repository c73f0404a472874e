use bugcache::config::{Config, LogConfig};
use bugcache::{
  bugs_by_user, unresolved_bugs, Bug, BugCache, BugCommand, BugDraft, BugId, CommandOutcome,
  HttpApiClient, UserId,
};
use clap::{Parser, Subcommand};
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "bugcache")]
#[command(about = "Browse and update bugs through a server-synchronized cache")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/bugcache/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Base url of the bug API
  #[arg(long)]
  base_url: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// List cached bugs
  List {
    /// Only bugs that are not resolved
    #[arg(long)]
    unresolved: bool,
    /// Only bugs assigned to this user
    #[arg(long)]
    user: Option<UserId>,
  },
  /// Create a bug
  Add { description: String },
  /// Assign a bug to a user
  Assign { bug: BugId, user: UserId },
  /// Mark a bug resolved
  Resolve { bug: BugId },
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let mut config = Config::load(args.config.as_deref())?;
  if let Some(base_url) = args.base_url {
    config.api.base_url = Some(base_url);
  }

  let _guard = init_logging(&config.log)?;

  let client = HttpApiClient::from_config(&config)?;
  let cache = BugCache::new(client);

  cache.dispatch(BugCommand::Load).await?;

  match args.command {
    Command::List { unresolved, user } => {
      let state = cache.snapshot();
      let bugs = match (unresolved, user) {
        (true, Some(user)) => unresolved_bugs(&state)
          .into_iter()
          .filter(|b| b.user_id == Some(user))
          .collect(),
        (true, None) => unresolved_bugs(&state),
        (false, Some(user)) => bugs_by_user(user)(&state),
        (false, None) => state.list.iter().collect(),
      };
      print_bugs(&bugs);
    }
    Command::Add { description } => {
      let command = BugCommand::Add(BugDraft::new(description));
      print_saved(cache.dispatch(command).await?)?;
    }
    Command::Assign { bug, user } => {
      let command = BugCommand::Assign {
        bug_id: bug,
        user_id: user,
      };
      print_saved(cache.dispatch(command).await?)?;
    }
    Command::Resolve { bug } => {
      let command = BugCommand::Resolve { bug_id: bug };
      print_saved(cache.dispatch(command).await?)?;
    }
  }

  Ok(())
}

/// Install the tracing subscriber. The returned guard flushes the log file on drop.
fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>> {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

  if !config.file {
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .init();
    return Ok(None);
  }

  let dir = Config::data_dir()?;
  std::fs::create_dir_all(&dir)
    .map_err(|e| eyre!("Failed to create log directory {}: {}", dir.display(), e))?;

  let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
    dir,
    "bugcache.log",
  ));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Ok(Some(guard))
}

fn print_saved(outcome: CommandOutcome) -> Result<()> {
  match outcome {
    CommandOutcome::Saved(bug) => {
      print_bugs(&[&bug]);
      Ok(())
    }
    other => Err(eyre!("Unexpected command outcome: {:?}", other)),
  }
}

fn print_bugs(bugs: &[&Bug]) {
  if bugs.is_empty() {
    println!("No bugs.");
    return;
  }

  for bug in bugs {
    let status = if bug.resolved { "resolved" } else { "open" };
    let assignee = bug
      .user_id
      .map(|u| format!("user {}", u))
      .unwrap_or_else(|| "-".to_string());
    println!("#{:<5} {:<9} {:<10} {}", bug.id, status, assignee, bug.description);
  }
}
