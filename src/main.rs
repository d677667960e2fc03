use clap::Parser;
use lineup_etl::domain::ports::ConfigProvider;
use lineup_etl::utils::{logger, validation::Validate};
use lineup_etl::{CliConfig, EtlEngine, LineupFetcher, LineupPipeline, LocalStorage, StagedCsvSource};
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting lineup-etl for {}", config.date);
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.data_root.clone());

    if config.skip_fetch {
        tracing::info!("Skipping fetch, running over already-staged extracts");
    } else {
        let fetcher = LineupFetcher::new(storage.clone(), config.source_pages());
        let staged = fetcher.run(config.processing_date()).await?;
        tracing::info!("Staged {} raw extracts", staged);
    }

    let source = StagedCsvSource::new(Path::new(&config.data_root).join("bronze"));
    let pipeline = LineupPipeline::new(source, storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ ETL run completed");
            println!("✅ ETL run completed");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) if e.is_missing_input() => {
            // Nothing staged for the date: the caller decides whether to
            // retry or skip, so this exits distinguishably from a failure.
            tracing::warn!("{}", e);
            eprintln!("⚠️  {}", e);
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!("ETL run failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
