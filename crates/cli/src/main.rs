use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vectest_storage::SchemaInit;

#[derive(Parser)]
#[command(name = "vectest")]
#[command(about = "pgvector smoke-test schema initializer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enable the vector extension, create test_vectors, seed one smoke row
    Init {
        /// Stop after the idempotent steps; do not append a smoke row
        #[arg(long)]
        skip_seed: bool,
    },
    /// Report whether the extension, table, and smoke rows exist
    Status,
}

fn get_database_url() -> Result<String> {
    std::env::var("DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable must be set"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    tracing::info!("connecting to PostgreSQL");
    let init = SchemaInit::connect(&get_database_url()?).await?;

    match cli.command {
        Commands::Init { skip_seed } => {
            if skip_seed {
                init.ensure_extension().await?;
                init.ensure_table().await?;
                println!("Schema ready (seed skipped)");
            } else {
                let id = init.run().await?;
                println!("Schema ready, smoke row id {id}");
            }
        }
        Commands::Status => {
            let status = init.status().await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}
