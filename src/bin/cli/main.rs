mod client;
mod commands;
mod output;

use clap::{Parser, Subcommand};
use client::StudyaidClient;
use output::{OutputConfig, OutputFormat};
use std::process;
use studyaid::config;

/// CLI for the studyaid flashcard server
#[derive(Parser, Debug)]
#[clap(name = "studyaid-cli", about = "CLI for the studyaid flashcard server")]
struct Cli {
    /// Server URL to connect to
    #[clap(
        long,
        env = "STUDYAID_URL",
        global = true
    )]
    server_url: Option<String>,

    /// Output format
    #[clap(long, value_enum, default_value_t = OutputFormat::Human, global = true)]
    format: OutputFormat,

    /// Quiet mode: minimal output (just IDs or counts)
    #[clap(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage subjects
    #[command(subcommand)]
    Subject(commands::subject::SubjectCommands),
    /// Manage flashcards
    #[command(subcommand)]
    Flashcard(commands::flashcard::FlashcardCommands),
    /// Manage uploaded documents
    #[command(subcommand)]
    Document(commands::document::DocumentCommands),
}

/// Resolves the server URL from CLI args, config file, or defaults
///
/// Precedence: CLI flag / env var > config file > default
fn resolve_server_url(cli_url: Option<String>) -> String {
    if let Some(url) = cli_url {
        return url;
    }

    // Try reading from config file
    if let Some(dir) = config::get_config_dir_path() {
        let config_path = dir.join(config::CONFIG_FILE_NAME);
        if let Ok(update) = config::config_from_file(Some(config_path)) {
            if let Some(url) = update.server_url {
                return url;
            }
        }
    }

    let defaults = config::base_config(None);
    format!("http://localhost:{}", defaults.port)
}

/// Formats an error for human-readable stderr output
fn format_error(err: &dyn std::error::Error) -> String {
    let err_string = err.to_string();

    if err_string.contains("error sending request")
        || err_string.contains("Connection refused")
        || err_string.contains("tcp connect error")
    {
        return format!(
            "Could not connect to server. Is studyaid running?\n  {}",
            err_string
        );
    }

    err_string
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let server_url = resolve_server_url(cli.server_url);
    let client = StudyaidClient::new(server_url);
    let output_config = OutputConfig {
        format: cli.format,
        quiet: cli.quiet,
    };

    let result = match cli.command {
        Commands::Subject(cmd) => commands::subject::execute(&client, cmd, &output_config).await,
        Commands::Flashcard(cmd) => commands::flashcard::execute(&client, cmd, &output_config).await,
        Commands::Document(cmd) => commands::document::execute(&client, cmd, &output_config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", format_error(e.as_ref()));
        process::exit(1);
    }
}
