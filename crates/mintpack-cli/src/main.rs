//! mintpack: prepare NFT artifacts and metadata on IPFS from the command line.
//!
//! The storage backend is chosen with IPFS_API (infura, nft.storage or pinata)
//! and configured through the matching credential variables; a `.env` file is
//! read when present.

use anyhow::Context;
use clap::{Parser, Subcommand};
use mintpack_cli::{init_tracing, load_asset, summarize_bundle};
use mintpack_processing::metadata::metadata_schema;
use mintpack_services::{
    prepare_bundle, BackendConfig, MintPipeline, MintRequest, TracingProgressReporter,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mintpack", about = "Content-address NFT artifacts and their metadata")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an artifact with its cover, thumbnail and metadata
    Prepare {
        /// Artifact file (image, video, audio, model, PDF or ZIP bundle)
        file: PathBuf,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        rights: String,
        /// Comma separated tags
        #[arg(long, default_value = "")]
        tags: String,
        /// Creator address
        #[arg(long)]
        creator: String,
        /// Image to derive the cover and thumbnail from
        #[arg(long)]
        cover: Option<PathBuf>,
    },
    /// Show what a ZIP bundle would upload after hardening
    InspectBundle {
        /// ZIP archive containing an index.html
        file: PathBuf,
    },
    /// Check the configured backend credentials
    VerifySettings,
    /// Print the metadata JSON schema
    MetadataSchema,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

fn load_config() -> anyhow::Result<BackendConfig> {
    BackendConfig::from_env().context(
        "Invalid storage configuration. Set IPFS_API and the credentials for that backend",
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare {
            file,
            title,
            description,
            rights,
            tags,
            creator,
            cover,
        } => {
            let config = load_config()?;
            let mut request = MintRequest::new(load_asset(&file)?, creator);
            request.title = title;
            request.description = description;
            request.rights = rights;
            request.tags = tags;
            request.cover = cover.as_deref().map(load_asset).transpose()?;

            let pipeline = MintPipeline::from_config(&config)
                .context("Failed to initialize storage backend")?
                .with_progress(Arc::new(TracingProgressReporter));
            let outcome = pipeline.prepare(request).await?;
            print_json(&outcome)?;
        }
        Commands::InspectBundle { file } => {
            let archive = load_asset(&file)?;
            let bundle = prepare_bundle(&archive.file_name, &archive.data)
                .with_context(|| format!("Failed to prepare {}", file.display()))?;
            print_json(&summarize_bundle(&bundle))?;
        }
        Commands::VerifySettings => {
            let config = load_config()?;
            let pipeline = MintPipeline::from_config(&config)
                .context("Failed to initialize storage backend")?;
            pipeline.store().verify_credentials().await?;
            print_json(&serde_json::json!({
                "backend": config.backend,
                "verified": true
            }))?;
        }
        Commands::MetadataSchema => {
            print_json(&metadata_schema())?;
        }
    }

    Ok(())
}
