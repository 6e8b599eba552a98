use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use mediachain::chain::global;
use mediachain::events::EventManager;
use mediachain::modules::ModuleManager;
use mediachain::providers::register_builtin;
use mediachain::types::{SeasonEpisodes, TorrentInfo};
use mediachain::{ChainBase, Config};

#[derive(Parser)]
#[command(name = "mediachain")]
#[command(about = "Media automation capability chain", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, help = "Config file (overrides MEDIACHAIN_CONFIG)")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List capabilities and the modules answering them, in order
    Capabilities,
    /// Normalize a release name for recognition
    Prepare {
        #[arg(help = "Release title")]
        title: String,
        #[arg(long)]
        subtitle: Option<String>,
    },
    /// Filter a JSON list of torrents
    Filter {
        #[arg(help = "JSON file holding an array of torrents")]
        torrents: PathBuf,
        #[arg(long, help = "Keep only this season")]
        season: Option<u32>,
        #[arg(
            long,
            value_delimiter = ',',
            requires = "season",
            help = "Episodes of --season to keep"
        )]
        episodes: Vec<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let manager = Arc::new(ModuleManager::new(config.modules.clone()));
    register_builtin(&manager, &config)?;
    let chain = global::init(ChainBase::new(manager, EventManager::new()))?;

    match cli.command {
        Commands::Capabilities => list_capabilities(chain),
        Commands::Prepare { title, subtitle } => prepare(chain, &title, subtitle.as_deref()).await,
        Commands::Filter {
            torrents,
            season,
            episodes,
        } => filter(chain, &torrents, season, episodes).await?,
    }

    Ok(())
}

fn list_capabilities(chain: &ChainBase) {
    for (capability, modules) in chain.registry().capabilities() {
        println!("{}: {}", capability, modules.join(", "));
    }
}

async fn prepare(chain: &ChainBase, title: &str, subtitle: Option<&str>) {
    match chain.prepare_recognize(title, subtitle).await {
        (None, None) => println!("{}", title),
        (new_title, new_subtitle) => {
            println!("{}", new_title.as_deref().unwrap_or(title));
            if let Some(new_subtitle) = new_subtitle {
                println!("{}", new_subtitle);
            }
        }
    }
}

async fn filter(
    chain: &ChainBase,
    path: &Path,
    season: Option<u32>,
    episodes: Vec<u32>,
) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let torrents: Vec<TorrentInfo> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid torrent list in {}", path.display()))?;

    let season_episodes = season.map(|season| SeasonEpisodes::from([(season, episodes)]));

    let filtered = chain
        .filter_torrents(&torrents, season_episodes.as_ref())
        .await;
    let kept = filtered.unwrap_or(torrents);

    println!("{}", serde_json::to_string_pretty(&kept)?);
    Ok(())
}
