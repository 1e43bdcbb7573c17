use trace_combo_core::api::{AppConfig, DeviceTransport};
use trace_combo_plugins::factory;

use crate::commands::cli::{DevicesArgs, OutputFormat};
use crate::error::CliError;

pub async fn handle_devices(args: DevicesArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let transport = factory::build_transport(cfg);
    if !transport.is_available().await {
        eprintln!("adb is not available at {}", transport.adb_path());
        return Ok(1);
    }

    let devices = transport.list_devices().await;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&devices)?),
        OutputFormat::Text if devices.is_empty() => println!("no devices attached"),
        OutputFormat::Text => {
            for d in &devices {
                let note = if d.is_ready() { "" } else { " (not ready)" };
                println!("{}\t{}\t{d}{note}", d.serial, d.state);
            }
        }
    }
    Ok(0)
}
