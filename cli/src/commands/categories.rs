use trace_combo_core::api::AppConfig;
use trace_combo_plugins::factory;
use trace_combo_plugins::tools::list_ftrace_events;

use crate::commands::cli::{CategoriesArgs, OutputFormat};
use crate::error::CliError;

pub async fn handle_categories(args: CategoriesArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let names = if args.ftrace {
        let transport = factory::build_transport(cfg);
        list_ftrace_events(transport.as_ref(), &args.device).await?
    } else {
        factory::build_systrace(cfg)
            .list_categories(&args.device)
            .await?
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
        OutputFormat::Text => {
            for name in &names {
                println!("{name}");
            }
        }
    }
    Ok(0)
}
