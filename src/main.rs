use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod app;
mod auth;
mod chat;
mod config;
mod handler;
mod market;
mod theme;
mod tui;
mod ui;

use app::App;
use chat::ChatClient;
use config::Config;

#[derive(Parser)]
#[command(name = "stockai")]
#[command(version)]
#[command(about = "Stock market dashboard with an AI assistant")]
struct Cli {
    /// Inference endpoint URL (overrides the config file)
    #[arg(long, env = "STOCKAI_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout in seconds. Omitted means no timeout: a stalled
    /// request waits indefinitely.
    #[arg(long)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the AI assistant one question and print the answer
    Ask {
        /// Your question
        question: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    if cli.timeout.is_some() {
        config.request_timeout_secs = cli.timeout;
    }

    init_logging()?;

    match cli.command {
        Some(Commands::Ask { question }) => ask_once(&config, &question).await,
        None => run_tui(config).await,
    }
}

/// Log to a file: stdout belongs to the TUI (and to `ask` output).
fn init_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .map(|p| p.join("stockai"))
        .unwrap_or_else(|| std::env::temp_dir().join("stockai"));
    std::fs::create_dir_all(&log_dir)?;
    let log_file = std::fs::File::create(log_dir.join("stockai.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

async fn ask_once(config: &Config, question: &str) -> Result<()> {
    let timeout = config.request_timeout_secs.map(Duration::from_secs);
    let client = ChatClient::new(&config.endpoint, timeout);

    match client.query(question).await {
        Ok(answer) => {
            println!("{answer}");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "one-shot query failed");
            eprintln!("{}", err.user_message());
            std::process::exit(1);
        }
    }
}

async fn run_tui(config: Config) -> Result<()> {
    tracing::info!(endpoint = %config.endpoint, "starting TUI");

    let mut app = App::new(&config);
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();

    let result = event_loop(&mut terminal, &mut app, &mut events).await;

    tui::restore()?;
    result
}

async fn event_loop(
    terminal: &mut tui::Tui,
    app: &mut App,
    events: &mut tui::EventHandler,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;
        if let Some(event) = events.next().await {
            handler::handle_event(app, event).await?;
        }
    }
    Ok(())
}
