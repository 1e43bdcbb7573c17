use clap::Parser;

mod commands;
mod error;
mod logging;

use commands::cli::{Args, Commands};
use error::CliError;

#[tokio::main]
async fn main() {
    let code = match run(Args::parse()).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    };
    std::process::exit(code);
}

async fn run(args: Args) -> Result<i32, CliError> {
    let cfg = commands::load_config(args.config.as_deref())?;
    // must outlive the command so buffered file logs are flushed
    let _log_guard = logging::init(&cfg.logging)?;
    tracing::debug!(
        target: "trace_combo.cli",
        config = ?args.config,
        output_dir = %cfg.output.dir.display(),
        "configuration loaded"
    );

    match args.command {
        Commands::Combo(combo_args) => commands::combo::handle_combo(combo_args, &cfg).await,
        Commands::Devices(devices_args) => {
            commands::devices::handle_devices(devices_args, &cfg).await
        }
        Commands::Categories(categories_args) => {
            commands::categories::handle_categories(categories_args, &cfg).await
        }
    }
}
