//! Subtis CLI - search and download subtitles from the command line
//!
//! Runs the same request flow the player addon uses, with a local file
//! standing in for the playing item.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use subtis::addon::base_name;
use subtis::prelude::*;

#[derive(Parser)]
#[command(name = "subtis")]
#[command(about = "Spanish subtitles from subt.is", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search subtitles for a movie file
    Search {
        /// Path to the movie file
        file: PathBuf,

        /// Byte size, when the file is not available locally
        #[arg(short, long)]
        size: Option<u64>,
    },

    /// Download a subtitle by link or id
    Download {
        /// Direct subtitle link
        #[arg(long, requires = "filename", conflicts_with = "id")]
        link: Option<String>,

        /// File name to save a linked subtitle under
        #[arg(long)]
        filename: Option<String>,

        /// Subtitle id to resolve through the API
        #[arg(long)]
        id: Option<String>,
    },

    /// Invoke the addon entry point like the player host does
    Dispatch {
        /// Listing handle passed by the host
        handle: i32,

        /// Query string, e.g. "?action=search"
        query: String,

        /// File the simulated player is playing
        #[arg(long)]
        playing: Option<PathBuf>,

        /// Media type reported by the simulated player
        #[arg(long)]
        media_type: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("subtis=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Search { file, size } => search(config, &file, size).await,
        Commands::Download { link, filename, id } => {
            let reference = match (link, filename, id) {
                (Some(link), Some(file_name), _) => SubtitleReference::Link { link, file_name },
                (_, _, Some(id)) => SubtitleReference::Id(id),
                _ => return Err(eyre!("Pass --link with --filename, or --id")),
            };
            download(config, &reference).await
        }
        Commands::Dispatch {
            handle,
            query,
            playing,
            media_type,
        } => dispatch(config, handle, &query, playing, media_type).await,
    }
}

async fn load_config(path: Option<&Path>) -> Result<Config> {
    // The per-user data dir is the default temp dir; a `temp_dir` key in the
    // config file replaces it.
    let mut defaults = Config::default();
    if let Some(data_dir) = dirs::data_dir() {
        defaults = defaults.with_temp_dir(data_dir.join("subtis").join("temp"));
    }

    let config = match path {
        Some(path) => Config::load_or(path, defaults).await?,
        None => defaults,
    };

    Ok(config)
}

async fn search(config: Config, file: &Path, size: Option<u64>) -> Result<()> {
    let file_size = match size {
        Some(size) => size,
        None => LocalFileStore.size(file).await.unwrap_or(0),
    };
    let item = MediaItem::new(base_name(&file.to_string_lossy()), file_size);

    let transport = Arc::new(HttpClient::new(&config.user_agent)?);
    let client = SearchClient::new(config, transport);

    match client.search(&item).await? {
        Some(result) => {
            println!("{} [{}]", result.display_label(), result.language_code);
            println!("  file:   {}", result.suggested_file_name);
            println!("  synced: {}", result.is_synced);
            match &result.reference {
                SubtitleReference::Link { link, .. } => println!("  link:   {}", link),
                SubtitleReference::Id(id) => println!("  id:     {}", id),
            }
        }
        None => println!("No subtitle found for {}", item.file_name),
    }

    Ok(())
}

async fn download(config: Config, reference: &SubtitleReference) -> Result<()> {
    let transport = Arc::new(HttpClient::new(&config.user_agent)?);
    let client = DownloadClient::new(config, transport, Arc::new(LocalFileStore));

    match client.download(reference).await? {
        Some(subtitle) => println!("{}", subtitle.local_path.display()),
        None => return Err(eyre!("Download failed for {}", reference.as_str())),
    }

    Ok(())
}

async fn dispatch(
    config: Config,
    handle: i32,
    query: &str,
    playing: Option<PathBuf>,
    media_type: Option<String>,
) -> Result<()> {
    let mut player = LocalPlayer::new(playing);
    if let Some(media_type) = media_type {
        player = player.with_media_type(media_type);
    }

    let listing = Arc::new(MemoryListing::new());
    let notifier = Arc::new(MemoryNotifier::new());

    let addon = Addon::builder(config)
        .player(Arc::new(player))
        .listing(listing.clone())
        .notifier(notifier.clone())
        .build()?;

    addon.run(&PluginParams::parse(query)).await;

    for n in notifier.notifications() {
        println!("[{:?} {}ms] {}", n.level, n.duration.as_millis(), n.message);
    }
    for entry in listing.items() {
        println!("{}\t{}\t{}", handle, entry.url, entry.item.label2);
    }

    Ok(())
}
