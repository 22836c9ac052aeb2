//! workq CLI — operator interface to the work queue.

use clap::{Parser, Subcommand};
use secrecy::ExposeSecret;
use tokio::signal;
use tracing::info;
use workq_rs::config::Config;
use workq_rs::error::Result;
use workq_rs::queue::WorkQueueClient;
use workq_rs::store::RedisStore;
use workq_rs::telemetry::{TelemetryConfig, init_telemetry};
use workq_rs::worker::{Handler, Worker, WorkerConfig};

#[derive(Parser)]
#[command(name = "workq", about = "Redis-backed single-consumer work queue")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the worker daemon
    Run {
        /// Seconds to sleep when the queue is empty
        #[arg(long, default_value_t = 1)]
        poll_interval: u64,
        /// Skip re-queuing a leftover in-processing item at startup
        #[arg(long)]
        no_recover: bool,
    },
    /// Push an item onto the queue tail
    Enqueue {
        /// Opaque work item payload
        item: String,
    },
    /// Show queue length and the in-processing marker
    Status {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Re-queue the in-processing item at the queue head
    Recover,
    /// Clear the in-processing marker
    Clear,
}

/// Demo handler: logs each item. Library users supply their own.
struct LogHandler;

#[async_trait::async_trait]
impl Handler for LogHandler {
    async fn handle(&self, item: &str) -> Result<()> {
        info!(item, "processing");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Run {
            poll_interval,
            no_recover,
        } => cmd_run(config, poll_interval, no_recover).await,
        Command::Enqueue { item } => {
            let client = client(&config).await?;
            client.enqueue(&item).await?;
            println!("Enqueued onto {}", client.queue_key());
            Ok(())
        }
        Command::Status { json } => cmd_status(config, json).await,
        Command::Recover => {
            let client = client(&config).await?;
            match client.recover().await? {
                Some(item) => println!("Re-queued: {item}"),
                None => println!("Nothing in-processing."),
            }
            Ok(())
        }
        Command::Clear => {
            let client = client(&config).await?;
            client.clear_in_processing().await?;
            println!("In-processing marker cleared.");
            Ok(())
        }
    }
}

async fn client(config: &Config) -> anyhow::Result<WorkQueueClient<RedisStore>> {
    let store = RedisStore::connect(config.redis_url.expose_secret()).await?;
    store.ping().await?;
    Ok(WorkQueueClient::new(store, config.queue())?)
}

async fn cmd_run(config: Config, poll_interval: u64, no_recover: bool) -> anyhow::Result<()> {
    let _guard = init_telemetry(TelemetryConfig {
        endpoint: config.otel_endpoint.clone(),
        service_name: "workq".to_string(),
    })?;

    let client = client(&config).await?;
    let worker = Worker::new(
        client,
        LogHandler,
        WorkerConfig {
            poll_interval: std::time::Duration::from_secs(poll_interval),
            recover_on_start: !no_recover,
        },
    );

    let shutdown = worker.shutdown_signal();
    tokio::spawn(async move {
        signal::ctrl_c().await.ok();
        shutdown.notify_one();
    });

    worker.run().await?;
    Ok(())
}

async fn cmd_status(config: Config, json: bool) -> anyhow::Result<()> {
    let client = client(&config).await?;
    let status = client.status().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Queue:          {}", status.queue_key);
        println!("Pending:        {}", status.len);
        println!(
            "In-processing:  {}",
            status.in_processing.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
