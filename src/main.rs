use anyhow::Context;
use clap::Parser;
use loadstat::utils::{logger, validation::Validate};
use loadstat::{CliConfig, HttpModelStore, HttpSimulator, LocalStorage, ReportEngine, ReportPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("starting loadstat");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let config = config.resolve().context("loading configuration file")?;

    if let Err(e) = config.validate() {
        tracing::error!("configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let store = HttpModelStore::new(config.api_endpoint.clone());
    let simulator = HttpSimulator::new(config.api_endpoint.clone());
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ReportPipeline::new(store, simulator, storage, config);

    let engine = ReportEngine::new(pipeline);
    let output_path = engine.run().await.context("report export failed")?;
    println!("Report saved to: {}", output_path);

    Ok(())
}
