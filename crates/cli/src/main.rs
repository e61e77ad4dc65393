//! UserSearch CLI — find users from the terminal.
//!
//! Talks to the user directory over HTTP through `usersearch-core`, the same
//! controller the desktop panel uses.

mod render;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::warn;

use usersearch_core::{
    ClientConfig, HttpDirectory, Navigator, PanelStore, SearchController, UserDirectory,
    GENERIC_SEARCH_ERROR,
};

/// UserSearch CLI — search users by name or username.
#[derive(Parser)]
#[command(name = "us", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory base URL (overrides config and USERSEARCH_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Load config from this TOML file instead of .usersearch.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON instead of human-readable text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search users once and print the matches
    Search {
        /// Name or username to look for
        query: String,
    },
    /// Print the suggested users list
    Suggested,
    /// Interactive panel: each stdin line is the current input, `:open N` picks a row
    Panel {
        /// Debounce window in milliseconds (default from config)
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Prints the profile URL the panel would open.
struct PrintNavigator {
    base_url: String,
}

impl Navigator for PrintNavigator {
    fn navigate(&self, route: &str) {
        println!("→ {}{}", self.base_url, route);
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig, String> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path).map_err(|e| e.to_string())?,
        None => {
            let cwd = std::env::current_dir().map_err(|e| e.to_string())?;
            ClientConfig::load(&cwd).map_err(|e| e.to_string())?
        }
    };
    if let Some(url) = &cli.base_url {
        config.set_base_url(url).map_err(|e| e.to_string())?;
    }
    Ok(config)
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("usersearch=warn".parse().expect("static directive")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "us", &mut std::io::stdout());
        return;
    }

    let config = load_config(&cli).unwrap_or_else(|e| fail(&format!("Config error: {e}")));
    let directory =
        HttpDirectory::new(&config).unwrap_or_else(|e| fail(&format!("Config error: {e}")));

    match cli.command {
        Commands::Search { query } => {
            let query = query.as_str();
            if query.is_empty() {
                fail("Query is empty; use `us suggested` to list suggested users");
            }
            let users = directory.search_users(query).await.unwrap_or_else(|e| {
                warn!(error = %e, query, "Error fetching user");
                fail(GENERIC_SEARCH_ERROR)
            });
            if cli.json {
                print_json(&render::users_json(&users));
            } else {
                if users.is_empty() {
                    eprintln!("No users found for '{query}'");
                    std::process::exit(1);
                }
                for (i, user) in users.iter().enumerate() {
                    println!("{}", render::user_line(i, &user.into()));
                }
                eprintln!("\n{} users", users.len());
            }
        }
        Commands::Suggested => {
            // Suggestions degrade to an empty list, never an error.
            let users = directory.suggested_users().await.unwrap_or_else(|e| {
                warn!(error = %e, "Could not load suggested users");
                Vec::new()
            });
            if cli.json {
                print_json(&render::users_json(&users));
            } else {
                for (i, user) in users.iter().enumerate() {
                    println!("{}", render::user_line(i, &user.into()));
                }
            }
        }
        Commands::Panel { debounce_ms } => {
            let debounce = debounce_ms.map(Duration::from_millis).unwrap_or(config.debounce);
            let controller = SearchController::new(
                Arc::new(directory),
                Arc::new(PrintNavigator { base_url: config.base_url.clone() }),
                PanelStore::new(true),
                debounce,
            );
            run_panel(controller, cli.json).await;
        }
        Commands::Completions { .. } => unreachable!("handled before config load"),
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => fail(&format!("Could not encode output: {e}")),
    }
}

fn print_view(controller: &SearchController, json: bool) {
    if json {
        let s = controller.snapshot();
        let users = if s.query().is_empty() {
            s.suggestions().users.as_slice()
        } else {
            s.users()
        };
        let mut out = render::users_json(users);
        if let (Some(err), serde_json::Value::Array(items)) = (s.error(), &mut out) {
            items.push(serde_json::json!({ "error": err }));
        }
        print_json(&out);
    } else {
        print!("{}", render::panel_text(&controller.view()));
    }
}

/// Drive the panel from stdin until EOF, `:quit`, or a row is opened.
async fn run_panel(controller: SearchController, json: bool) {
    controller.load_suggestions().await;
    print_view(&controller, json);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<JoinHandle<()>> = None;

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Could not read stdin");
                break;
            }
        };

        if line.trim() == ":quit" {
            break;
        }
        if let Some(arg) = line.trim().strip_prefix(":open") {
            if let Some(handle) = pending.take() {
                let _ = handle.await;
            }
            let view = controller.view();
            match arg.trim().parse::<usize>() {
                Ok(n) if n >= 1 && n <= view.list.rows().len() => {
                    controller.select(&view.list.rows()[n - 1]);
                    break;
                }
                _ => eprintln!("No row '{}' (1-{})", arg.trim(), view.list.rows().len()),
            }
            continue;
        }

        let settled = controller.on_input(&line);
        let c = controller.clone();
        pending = Some(tokio::spawn(async move {
            if let Ok(true) = settled.await {
                print_view(&c, json);
            }
        }));
    }

    if let Some(handle) = pending.take() {
        let _ = handle.await;
    }
    controller.cancel_inflight();
}
