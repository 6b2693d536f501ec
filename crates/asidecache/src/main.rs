use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asidecache::catalog::CategoryCatalog;
use asidecache::config::Config;
use asidecache::models::Category;
use asidecache::storage::{CategoryFilter, SqliteDatabase};
use asidecache_core::aside::Lookup;
use asidecache_core::cache::KeyValueStore;

/// asidecache - Cache-aside category lookups over SQLite
#[derive(Debug, Parser)]
#[command(name = "asidecache")]
#[command(version, about, long_about = None)]
struct Cli {
    /// SQLite database path. Overrides SQLITE_PATH.
    #[arg(long)]
    database: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the schema and insert the demo categories.
    Seed,
    /// List categories through the single-key cache.
    List {
        /// Only categories whose name starts with this prefix.
        #[arg(long)]
        search: Option<String>,
        /// Run the lookup this many times.
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },
    /// Get categories by id through the hash merge cache.
    Get {
        /// Comma-separated category ids.
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<i64>,
        /// Run the lookup this many times.
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asidecache=debug,asidecache_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().with_sqlite_path(cli.database);

    let db = SqliteDatabase::new(&config.sqlite_path).await?;
    tracing::info!(path = %config.sqlite_path, "Opened database");

    if let Commands::Seed = cli.command {
        let inserted = db.seed_demo().await?;
        println!("seeded {inserted} categories");
        return Ok(());
    }

    let store = create_store(&config).await?;
    let catalog = CategoryCatalog::new(store, &db, config.cache_ttl());

    run(&catalog, cli.command).await
}

#[cfg(feature = "memory")]
async fn create_store(config: &Config) -> Result<Arc<asidecache::cache::MemoryStore>> {
    tracing::info!(
        max_entries = config.cache_max_entries,
        "Using in-memory cache"
    );
    Ok(Arc::new(asidecache::cache::MemoryStore::new(
        config.cache_max_entries,
    )))
}

#[cfg(feature = "redis")]
async fn create_store(config: &Config) -> Result<Arc<asidecache::cache::RedisStore>> {
    tracing::info!(url = %config.redis_url, "Connecting to Redis cache");
    let store = asidecache::cache::RedisStore::new(&config.redis_url).await?;
    Ok(Arc::new(store))
}

async fn run<S: KeyValueStore>(catalog: &CategoryCatalog<S>, command: Commands) -> Result<()> {
    match command {
        Commands::Seed => {}
        Commands::List { search, repeat } => {
            let filter = CategoryFilter { search };
            for run in 1..=repeat {
                let lookup = catalog.list(&filter).await?;
                report(run, lookup)?;
            }
        }
        Commands::Get { ids, repeat } => {
            for run in 1..=repeat {
                let lookup = catalog.by_ids(&ids).await?;
                report(run, lookup)?;
            }
        }
    }
    Ok(())
}

fn report(run: u32, lookup: Lookup<Category>) -> Result<()> {
    tracing::info!(run, source = ?lookup.source, faults = lookup.faults.len(), "Lookup finished");
    for fault in &lookup.faults {
        tracing::warn!(run, error = %fault, "Cache fault");
    }

    match lookup.into_entities() {
        Some(categories) => println!("{}", serde_json::to_string_pretty(&categories)?),
        None => println!("not found"),
    }
    Ok(())
}
