use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use courier::core::config::{CliOverrides, load_config, resolve};
use courier::tui;

#[derive(Parser)]
#[command(
    name = "courier",
    about = "Terminal client for sending and browsing queued messages"
)]
struct Args {
    /// Backend base URL (overrides COURIER_BASE_URL and the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Start the message list with auto-refresh on (`--auto-refresh false` to force off)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    auto_refresh: Option<bool>,

    /// Auto-refresh period in seconds
    #[arg(long)]
    refresh_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to courier.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("courier.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = load_config().map_err(std::io::Error::other)?;
    let cli = CliOverrides {
        base_url: args.base_url,
        auto_refresh: args.auto_refresh,
        refresh_secs: args.refresh_secs,
    };
    let config = resolve(&file_config, &cli).map_err(std::io::Error::other)?;

    log::info!("Courier starting up against {}", config.base_url);

    tui::run(config)
}
