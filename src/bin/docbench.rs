//! Benchmark binary

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use docbench::runner::{BenchRunner, ClientOutcome, RunReport};
use docbench::store::{DocumentStore, MemoryStore, MongoStore};
use docbench::BenchConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docbench")]
#[command(about = "Concurrent bulk-insert benchmark for document stores")]
#[command(version)]
struct Cli {
    /// Connection string for the target store
    #[arg(long)]
    uri: Option<String>,

    /// Number of concurrent clients
    #[arg(long)]
    clients: Option<usize>,

    /// Documents per client, sent as one bulk insert
    #[arg(long)]
    batch_size: Option<usize>,

    /// Database holding the target collection
    #[arg(long)]
    database: Option<String>,

    /// Collection receiving the inserts
    #[arg(long)]
    collection: Option<String>,

    /// Store backend to drive
    #[arg(long, value_enum, default_value = "mongo")]
    backend: Backend,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Backend {
    /// Real MongoDB driver
    Mongo,
    /// In-process recording store (dry run)
    Memory,
}

/// Layered sources first (defaults, file, environment), CLI flags on top.
fn assemble_config(cli: &Cli) -> anyhow::Result<BenchConfig> {
    let mut config = BenchConfig::load(cli.config.as_deref())?;

    if let Some(uri) = &cli.uri {
        config.uri = uri.clone();
    }
    if let Some(clients) = cli.clients {
        config.client_count = clients;
    }
    if let Some(batch_size) = cli.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(database) = &cli.database {
        config.database = database.clone();
    }
    if let Some(collection) = &cli.collection {
        config.collection = collection.clone();
    }

    config.validate()?;
    Ok(config)
}

fn print_report(report: &RunReport) {
    println!();
    for client in &report.clients {
        match &client.outcome {
            ClientOutcome::Completed { elapsed, .. } => {
                println!("Client {} insert time: {:?}", client.client_index, elapsed);
            }
            ClientOutcome::Failed { error } => {
                println!("Client {} failed: {}", client.client_index, error);
            }
        }
    }
    println!("Total time: {:?}", report.total_elapsed);

    println!();
    println!("Run report:");
    println!("  Run id: {}", report.run_id);
    println!("  Started: {}", report.started_at.to_rfc3339());
    println!(
        "  Clients: {} completed, {} failed",
        report.completed_count(),
        report.failed_count()
    );
    println!("  Documents inserted: {}", report.documents_inserted());
    println!("  Throughput: {:.0} docs/sec", report.docs_per_second());
    if let (Some(fastest), Some(mean), Some(slowest)) = (
        report.fastest_insert(),
        report.mean_insert(),
        report.slowest_insert(),
    ) {
        println!(
            "  Insert time: fastest {:?}, mean {:?}, slowest {:?}",
            fastest, mean, slowest
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("docbench v{}", docbench::VERSION);

    let config = assemble_config(&cli)?;

    let store: Arc<dyn DocumentStore> = match cli.backend {
        Backend::Mongo => Arc::new(MongoStore::new()),
        Backend::Memory => Arc::new(MemoryStore::new()),
    };

    let runner = BenchRunner::new(config, store);
    let report = runner.run().await?;

    print_report(&report);

    if !report.all_completed() {
        anyhow::bail!(
            "{} of {} clients failed",
            report.failed_count(),
            report.clients.len()
        );
    }

    Ok(())
}
