use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod bundle;
mod config;
mod error;
mod github;
mod release;

use bundle::Bundle;
use config::{Config, Overrides};
use github::GitHubClient;
use release::{ExternalSigner, Outcome, ReleasePublisher, ReleaseRequest};

#[derive(Parser)]
#[command(name = "release-publisher")]
#[command(about = "Create a GitHub release for the current version and upload signed artifacts")]
struct Cli {
    /// GitHub API token (can also be set via GITHUB_TOKEN env var)
    #[arg(long, env = "GITHUB_TOKEN")]
    token: String,

    /// Release signer binary, invoked as `<signer> -o <out> -i <in>`
    #[arg(long)]
    signer: Option<PathBuf>,

    /// Don't actually do the release, just print it
    #[arg(long)]
    dry_run: bool,

    /// Config file (defaults to release.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Repository to release to, as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Product name used in the release title and notes
    #[arg(long)]
    product: Option<String>,

    /// Archive or directory holding VERSION and ChangeLog (defaults to this executable)
    #[arg(long)]
    bundle: Option<PathBuf>,

    /// Artifacts to sign and attach to the release
    artifacts: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())
        .context("Failed to load config")?
        .apply(Overrides {
            repository: cli.repository,
            product: cli.product,
            signer: cli.signer,
        })?;

    let bundle = match cli.bundle {
        Some(path) => Bundle::open(path),
        None => Bundle::current_exe()?,
    };
    let version = bundle
        .read_version(&config.sources.version_file)
        .context("Failed to read version")?;
    let changelog = bundle
        .read_to_string(&config.sources.changelog_file)
        .context("Failed to read changelog")?;

    let request = ReleaseRequest {
        version,
        product: config.product_name().to_string(),
        changelog,
        target_commitish: std::env::var(&config.sources.commit_env).ok(),
    };

    // Dry runs only make read-only calls, so they go out without credentials.
    let token = (!cli.dry_run).then_some(cli.token);
    let client = GitHubClient::new(&config.github, token).await?;
    info!("Releasing {} v{} to {}", request.product, request.version, client.releases_url());

    let signer = ExternalSigner::new(config.signer.clone());
    let publisher = ReleasePublisher::new(client, signer, cli.dry_run);

    let outcome = match publisher.publish(&request, &cli.artifacts).await {
        Ok(outcome) => outcome,
        Err(err) => {
            if err.is_configuration() {
                error!("Release aborted; fix the configuration before rerunning");
            }
            return Err(err.into());
        }
    };
    match outcome {
        Outcome::AlreadyReleased | Outcome::DryRun => {}
        Outcome::Published { release_id, assets } => {
            println!("Release {} created with {} assets", release_id, assets);
        }
    }

    Ok(())
}
