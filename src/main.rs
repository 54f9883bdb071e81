use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};

use grablist::config::{Config, FolderLayout};
use grablist::error::DownloaderError;
use grablist::list::AddOutcome;
use grablist::logging;
use grablist::runner::Runner;

#[derive(Parser)]
#[command(name = "grablist")]
#[command(about = "URL download dispatcher for YouTube, Pinterest and Wildberries links")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download everything in the list, then clear it
    Download {
        /// Keep the list instead of clearing it after the pass
        #[arg(long)]
        keep: bool,
        /// Root directory for the download tree (overrides config)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Validate and append a URL to the download list
    Add { url: String },
    /// Show pending URLs and where each would be routed
    List,
    /// Empty the download list
    Clear,
}

fn build_runner(config: &Config, root_override: Option<PathBuf>) -> Result<Runner, DownloaderError> {
    let layout = match root_override {
        Some(root) => FolderLayout::new(root),
        None => FolderLayout::from_config(config)?,
    };
    layout.ensure()?;
    Runner::new(config, layout)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Download { keep, root } => {
            let runner = build_runner(&config, root)?;
            println!("🔄 Running download pass...");

            let summary = runner.run(keep).await?;
            if summary.total == 0 {
                println!("The download list is empty.");
                return Ok(());
            }

            println!("\n📊 Download Results:");
            println!("   Total URLs: {}", summary.total);
            println!("   Completed: {}", summary.completed);
            println!("   Unsupported: {}", summary.unsupported);
            println!("   Errors: {}", summary.errors.len());

            if !summary.errors.is_empty() {
                println!("\n⚠️  Errors encountered:");
                for e in &summary.errors {
                    println!("   - {e}");
                }
            }
            if summary.is_clean() {
                println!("✅ Download pass completed successfully");
            }
        }
        Commands::Add { url } => {
            let runner = build_runner(&config, None)?;
            match runner.list().add(&url) {
                Ok(AddOutcome::Added) => {
                    println!("✅ Added to list: {url}");
                }
                Ok(AddOutcome::AlreadyListed) => {
                    println!("Already in the list: {url}");
                }
                Err(e) => {
                    error!("Could not add link: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::List => {
            let runner = build_runner(&config, None)?;
            let urls = match runner.list().load() {
                Ok(urls) => urls,
                Err(DownloaderError::ListMissing(path)) => {
                    println!("No download list yet ({})", path.display());
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            if urls.is_empty() {
                println!("The download list is empty.");
                return Ok(());
            }
            for url in &urls {
                let handler = runner.handler_name_for(url).unwrap_or("unsupported");
                println!("{handler:22} {url}");
            }
        }
        Commands::Clear => {
            let runner = build_runner(&config, None)?;
            runner.list().clear()?;
            info!("Download list cleared by user");
            println!("✅ Download list cleared");
        }
    }
    Ok(())
}
