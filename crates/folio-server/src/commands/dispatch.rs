use anyhow::Context;
use folio_config::FolioConfig;
use folio_core::Repository;
use serde::Serialize;

use crate::cli::Commands;
use crate::commands::{serve, store, update};

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, config: &FolioConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve(args) => serve::handle(&args, config).await,
        Commands::Sync => {
            config.validate().context("invalid configuration")?;
            let outcome = store::open(config)?.sync().await?;
            if outcome.freshness == folio_store::Freshness::Stale {
                tracing::warn!("GitHub unavailable; printed records are from the local cache");
            }
            print_json(&outcome.records)
        }
        Commands::List => print_json(&store::open(config)?.list_cached().await?),
        Commands::Update(args) => {
            let payload = update::payload(args.id, &args.fields)?;
            let report = store::open(config)?.update_from_json(&payload).await?;
            print_json(&report)
        }
        Commands::Image(args) => {
            let report = store::open(config)?
                .update_image(args.id, args.image)
                .await?;
            print_json(&report)
        }
        Commands::Clear => {
            let existed = store::open(config)?.clear().await?;
            print_json(&serde_json::json!({ "deleted": existed }))
        }
        Commands::Schema => print_json(&schemars::schema_for!(Vec<Repository>)),
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}
