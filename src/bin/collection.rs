//! Schema Collection CLI
//!
//! Loads schema objects from a directory, combines them into a collection
//! and prints it as JSON.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use schema_collection::{
    group_by_title, load_documents, CollectionConfig, CollisionPolicy, OutputFormat,
    SchemaRegistry,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-collection")]
#[command(about = "Combine versioned schema objects into a collection")]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Combine every schema object under a directory
    Combine {
        /// Directory containing schema object JSON files
        dir: PathBuf,

        /// Package name for schemas that have none
        #[arg(short, long)]
        package: Option<String>,

        /// Fail when two schemas share a name or version
        #[arg(long)]
        reject_collisions: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the effective configuration
    ShowConfig {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = CollectionConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Combine {
            dir,
            package,
            reject_collisions,
            output,
        } => {
            let policy = if reject_collisions {
                CollisionPolicy::Reject
            } else {
                cfg.combine.collisions
            };

            let schemas = load_documents(&dir, &cfg.loader)
                .with_context(|| format!("loading schemas from {}", dir.display()))?;
            info!(schemas = schemas.len(), "loaded schema objects");

            let mut registry = SchemaRegistry::with_policy(policy);
            for group in group_by_title(schemas) {
                registry.register(group)?;
            }

            if let Some(package) = package.or(cfg.package.default.clone()) {
                registry.stamp(&package);
            }
            info!(
                names = registry.len(),
                entries = registry.entries().len(),
                "combined collection"
            );

            let collection = registry.into_collection();
            let rendered = match cfg.output.format {
                OutputFormat::Pretty => serde_json::to_string_pretty(&collection)?,
                OutputFormat::Compact => serde_json::to_string(&collection)?,
            };

            match output {
                Some(path) => {
                    fs::write(&path, rendered)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "wrote collection");
                }
                None => println!("{}", rendered),
            }
        }

        Commands::ShowConfig { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else {
                println!("{}", toml::to_string_pretty(&cfg)?);
            }
        }
    }

    Ok(())
}
