use chrono::Local;
use clap::Parser;
use jobingest::{
    config::{Cli, IngestConfig},
    info_time,
    ingest::run_ingest,
    request::build_client,
    Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let config = IngestConfig::try_from(Cli::parse())?;

    info_time!(
        "Backend: {} | queries={:?}",
        config.base_url,
        config.queries
    );

    let client = build_client(config.timeout)?;
    let summary = run_ingest(&client, &config).await;
    info_time!(
        start_time,
        "Done. Processed {} jobs across all calls.",
        summary.total_jobs
    );

    Ok(())
}
