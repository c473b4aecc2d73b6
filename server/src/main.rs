mod game_holder;
mod pages;
mod server_config;
mod web_server;

use clap::Parser;
use common::{log, logger};

use game_holder::GameHolder;
use server_config::{DEFAULT_CONFIG_FILE_NAME, get_config_manager};
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "gravity_four_server")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// YAML config file; defaults are used when it does not exist.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
    config: String,

    /// Overrides `listen_address` from the config file.
    #[arg(long)]
    listen_address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = get_config_manager(&args.config).get_config()?;
    if let Some(listen_address) = args.listen_address {
        config.listen_address = listen_address;
        config.socket_addr()?;
    }
    log!(
        "Config loaded from {}: listen {}, static files {}",
        args.config,
        config.listen_address,
        config.static_files_path
    );

    run_web_server(&config, GameHolder::new()).await?;

    log!("Server shut down gracefully");

    Ok(())
}
