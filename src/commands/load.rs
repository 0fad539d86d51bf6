//! Load command handler.

use anyhow::Context;
use synth_load_mongodb::{mask_connection_password, LoadReport, MongoDBLoadArgs, MongoDBLoader};

/// Run the load command: read the JSON files into MongoDB.
pub async fn run_load(args: &MongoDBLoadArgs) -> anyhow::Result<LoadReport> {
    anyhow::ensure!(
        args.data_dir.is_dir(),
        "Data directory {:?} does not exist; run `shop-synth generate` first",
        args.data_dir
    );

    tracing::info!(
        "Loading {:?} into {} / {} (batch size {})",
        args.data_dir,
        mask_connection_password(&args.mongodb_connection_string),
        args.mongodb_database,
        args.batch_size
    );

    let loader = MongoDBLoader::connect(&args.mongodb_connection_string, &args.mongodb_database)
        .await
        .context("Failed to connect to MongoDB")?
        .with_batch_size(args.batch_size);

    let report = loader
        .load_dataset(&args.data_dir)
        .await
        .with_context(|| format!("Failed to load dataset from {:?}", args.data_dir))?;

    for (collection, count) in &report.counts {
        tracing::info!("  {:<13} {:>12} documents", format!("{collection}:"), count);
    }
    if !report.skipped.is_empty() {
        tracing::warn!("Skipped collections with no file: {:?}", report.skipped);
    }
    tracing::info!("Total revenue: ${:.2}", report.total_revenue);

    Ok(report)
}
