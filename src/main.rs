use clap::{Parser, Subcommand};
use helpdesk::api::HttpBackend;
use helpdesk::core::config::{self, CliOverrides, HelpdeskConfig};
use helpdesk::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "helpdesk", about = "Terminal chat client for a question-answering backend")]
struct Args {
    /// Backend base URL (overrides config and HELPDESK_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Platform selected at startup
    #[arg(short, long)]
    platform: Option<String>,

    /// Start in dark mode
    #[arg(long)]
    dark: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the backend to rebuild its search index, then exit
    Reindex,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - the terminal belongs to the TUI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("helpdesk.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        HelpdeskConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            base_url: args.base_url.as_deref(),
            platform: args.platform.as_deref(),
            dark: args.dark,
        },
        |key| std::env::var(key).ok(),
    );
    log::info!(
        "Helpdesk starting up: backend={}, platform={:?}, theme={:?}",
        resolved.base_url,
        resolved.platforms.get(resolved.selected_platform),
        resolved.theme
    );

    let backend = HttpBackend::new(resolved.base_url.clone());

    if let Some(Command::Reindex) = args.command {
        return match backend.create_index().await {
            Ok(status) => {
                println!("{}", status.status);
                Ok(())
            }
            Err(e) => {
                log::warn!("Reindex failed: {}", e);
                Err(std::io::Error::other(e))
            }
        };
    }

    tui::run(resolved, Arc::new(backend))
}
