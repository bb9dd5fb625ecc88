use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use colored::*;
use savevault_cli::config::{validate_port, Config};

mod cli;

use cli::tags::{handle_tags_command, TagsCommands};

#[derive(Parser)]
#[command(name = "savevault")]
#[command(about = "SaveVault - tag backups and saves")]
#[command(version)]
struct Cli {
    /// Directory holding tags.json (overrides SAVEVAULT_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(long, help = "Address to bind (overrides SAVEVAULT_API_HOST)")]
        host: Option<std::net::IpAddr>,
        #[arg(long, help = "Port to bind (overrides SAVEVAULT_API_PORT)")]
        port: Option<u16>,
    },
    /// Manage tags directly in the local database
    #[command(subcommand)]
    Tags(TagsCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    savevault_cli::init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = validate_port(port)?;
            }
            savevault_cli::run_server(config).await
        }
        Commands::Tags(command) => {
            let commands = savevault_cli::open_commands(&config.data_dir).await?;
            handle_tags_command(&commands, command).await
        }
    }
}
