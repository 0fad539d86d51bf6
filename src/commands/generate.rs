//! Generate command handler.

use anyhow::Context;
use synth_export::{GenerateArgs, JsonExporter};
use synth_generator::{DataGenerator, GenerationStats};

/// Run the generate command: build the dataset and write it as JSON files.
pub fn run_generate(args: &GenerateArgs) -> anyhow::Result<GenerationStats> {
    let config = args.resolve().with_context(|| match &args.config {
        Some(path) => format!("Invalid generation config {path:?}"),
        None => "Invalid generation options".to_string(),
    })?;

    tracing::info!(
        "Generating {} users, {} products, {} categories, {} sessions, {} transactions over {} days (seed={})",
        config.num_users,
        config.num_products,
        config.num_categories,
        config.num_sessions,
        config.num_transactions,
        config.timespan_days,
        config.seed
    );

    let session_chunk_size = config.session_chunk_size;
    let generator = DataGenerator::new(config).context("Failed to create generator")?;
    let (dataset, stats) = generator.generate().context("Dataset generation failed")?;

    tracing::info!(
        "Generated {} sessions ({} converted) and {} transactions ({} from sessions, {} independent) in {} iterations",
        stats.sessions,
        stats.converted_sessions,
        stats.transactions(),
        stats.session_transactions,
        stats.independent_transactions,
        stats.iterations
    );
    if stats.aborted_checkouts > 0 {
        tracing::warn!(
            "{} checkouts aborted on insufficient stock, {} units consumed without a transaction",
            stats.aborted_checkouts,
            stats.stranded_units
        );
    }
    tracing::info!(
        "Stock: {} units initially, {} remaining",
        stats.initial_stock,
        stats.remaining_stock
    );

    if args.dry_run {
        tracing::info!(
            "[DRY-RUN] Would write {} files to {:?}",
            4 + dataset.sessions.len().div_ceil(session_chunk_size),
            args.output_dir
        );
        return Ok(stats);
    }

    let metrics = JsonExporter::new(&args.output_dir)
        .with_session_chunk_size(session_chunk_size)
        .export(&dataset)
        .with_context(|| format!("Failed to export dataset to {:?}", args.output_dir))?;

    tracing::info!(
        "Wrote {} records to {} files ({} session chunks) in {:?}",
        metrics.records_written,
        metrics.files.len(),
        metrics.session_chunks,
        metrics.total_duration
    );

    Ok(stats)
}
