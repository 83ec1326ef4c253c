use dotenvy::dotenv;
use split_buddy::{
    config,
    core::{Ledger, report},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Build the ledger and create the seed groups
    let ledger = Ledger::from_config(&app_config)
        .inspect_err(|e| error!("Failed to seed groups: {}", e))?;

    // 5. Print an overview of every group
    let symbol = &app_config.currency_symbol;
    for group in ledger.groups() {
        println!("{}", group.name);
        println!("  {}", report::format_group_header(group, symbol));
        for member in &group.members {
            println!("  {} {} <{}> {}", member.avatar, member.name, member.email, member.color);
        }
        if let Some(summary) = ledger.group_summary(group.id) {
            println!("  {}", report::format_group_summary(&summary, symbol));
        }
    }

    Ok(())
}
