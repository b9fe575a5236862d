//! area-energy
//!
//! Renders one area energy card and prints the resulting view as JSON.

use std::path::PathBuf;

use ae_card::{AreaEnergyCard, FileStatisticsSource, WebSocketStatisticsSource};
use ae_chart::ThemeColors;
use ae_config::load_config;
use ae_registries::RegistrySnapshot;
use ae_statistics::StatisticsSource;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "area-energy")]
#[command(about = "Render an area power and energy chart configuration")]
#[command(version)]
struct Args {
    /// Card configuration (YAML)
    #[arg(short, long)]
    config: PathBuf,

    /// Registry snapshot (JSON)
    #[arg(short, long)]
    registry: PathBuf,

    /// Recorded statistics keyed by entity id (JSON)
    #[arg(short, long, conflicts_with = "url", required_unless_present = "url")]
    statistics: Option<PathBuf>,

    /// Instance URL, e.g. http://homeassistant.local:8123
    #[arg(long, requires = "token")]
    url: Option<String>,

    /// Long-lived access token
    #[arg(long, requires = "url")]
    token: Option<String>,

    /// End of the 24 hour window (RFC 3339), defaults to now
    #[arg(long)]
    end: Option<DateTime<Utc>>,

    /// Theme variables for `var(--name)` colors (JSON object)
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the view
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = load_config(&args.config)
        .with_context(|| format!("Failed to load card config {}", args.config.display()))?;
    let snapshot = RegistrySnapshot::load(&args.registry)
        .await
        .with_context(|| format!("Failed to load registry {}", args.registry.display()))?;

    let source: Box<dyn StatisticsSource> = match (&args.statistics, &args.url, &args.token) {
        (Some(path), _, _) => Box::new(
            FileStatisticsSource::load(path)
                .await
                .with_context(|| format!("Failed to load statistics {}", path.display()))?,
        ),
        (None, Some(url), Some(token)) => {
            info!("Fetching statistics from {}", url);
            Box::new(WebSocketStatisticsSource::new(url, token))
        }
        _ => anyhow::bail!("either --statistics or --url and --token is required"),
    };

    let mut card = AreaEnergyCard::new(config);
    if let Some(path) = &args.theme {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read theme {}", path.display()))?;
        let theme: ThemeColors = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse theme {}", path.display()))?;
        card = card.with_theme(theme);
    }

    let view = match args.end {
        Some(end) => card.render_at(&snapshot, source.as_ref(), end).await,
        None => card.render(&snapshot, source.as_ref()).await,
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string(&view)?
    };
    println!("{}", output);

    Ok(())
}
