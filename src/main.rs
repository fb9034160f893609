//! ai-query - ask an HTTP answer service from the terminal
//!
//! Without a subcommand this opens the interactive form; `ask` submits one
//! query and prints the rendered form.

use std::path::PathBuf;
use std::process::ExitCode;

use ai_query::config::{
    ConfigBuilder, KEY_ENDPOINT, KEY_PROXY_DESTINATION, KEY_PROXY_SOURCE, MemoryConfigProvider,
};
use ai_query::observability::{self, LogConfig};
use ai_query::{FormConfig, QueryClient, QueryForm, RenderState};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

#[derive(Parser)]
#[command(name = "ai-query")]
#[command(version, about = "Ask an HTTP answer service from the terminal", long_about = None)]
struct Cli {
    /// Query endpoint URL, or a path routed through the proxy rule
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,

    /// Path prefix the proxy rule rewrites
    #[arg(long, value_name = "PREFIX")]
    proxy_source: Option<String>,

    /// Origin the proxy rule rewrites to
    #[arg(long, value_name = "URL")]
    proxy_destination: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log file (interactive mode logs here instead of the screen)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive form (default)
    Tui {
        /// Pre-fill the input
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Submit one query and print the result
    Ask {
        /// Query text (may be empty)
        query: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    install_panic_hook();
    color_eyre::install()?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui { query: None });

    let log_config = match (&command, cli.log_file) {
        (_, Some(path)) => LogConfig::file(path, cli.debug),
        (Commands::Tui { .. }, None) => {
            LogConfig::file(observability::default_log_file(), cli.debug)
        }
        (Commands::Ask { .. }, None) => LogConfig::stderr(cli.debug),
    };
    observability::init_tracing(&log_config).wrap_err("failed to set up logging")?;

    let overrides = MemoryConfigProvider::named("cli")
        .value_opt(KEY_ENDPOINT, cli.endpoint)
        .value_opt(KEY_PROXY_SOURCE, cli.proxy_source)
        .value_opt(KEY_PROXY_DESTINATION, cli.proxy_destination);
    let config = ConfigBuilder::new()
        .memory(overrides)
        .env()
        .load()
        .await
        .wrap_err("invalid configuration")?;

    match command {
        Commands::Tui { query } => run_tui(&config, query).await,
        Commands::Ask { query } => run_ask(&config, &query).await,
    }
}

async fn run_tui(config: &FormConfig, query: Option<String>) -> Result<ExitCode> {
    let form = build_form(config)?;
    if let Some(query) = query {
        form.set_query(query);
    }
    ai_query::tui::run(form).await?;
    Ok(ExitCode::SUCCESS)
}

async fn run_ask(config: &FormConfig, query: &str) -> Result<ExitCode> {
    let form = build_form(config)?;
    let outcome = form.submit_query(query).await;
    print!("{}", form.view());

    Ok(if outcome == RenderState::Error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn build_form(config: &FormConfig) -> Result<QueryForm> {
    let client = QueryClient::from_config(config)?;
    tracing::info!(endpoint = %client.endpoint(), "Query endpoint resolved");
    Ok(QueryForm::new(client))
}

/// Install panic hook to restore terminal on panic
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::execute!(std::io::stderr(), crossterm::terminal::LeaveAlternateScreen);
        let _ = crossterm::terminal::disable_raw_mode();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ask_allows_empty_query() {
        let cli = Cli::try_parse_from(["ai-query", "ask", ""]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Ask { query }) if query.is_empty()));
    }

    #[test]
    fn test_global_overrides() {
        let cli = Cli::try_parse_from([
            "ai-query",
            "--endpoint",
            "/api/query",
            "--proxy-destination",
            "http://svc:8000/",
            "-d",
        ])
        .unwrap();
        assert_eq!(cli.endpoint.as_deref(), Some("/api/query"));
        assert_eq!(cli.proxy_destination.as_deref(), Some("http://svc:8000/"));
        assert!(cli.debug);
        assert!(cli.command.is_none());
    }
}
