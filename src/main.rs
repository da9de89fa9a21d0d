mod app;
mod cavasik;
mod color;
mod config;
mod error;
mod extract;
mod mpris;
mod output;
mod scheme;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};

use scheme::Scheme;

#[derive(Debug, Parser)]
#[command(
    name = "cavasync",
    version,
    about = "Sync Cavasik visualizer colors with the playing track's album art"
)]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Color scheme to use (overrides the configured one).
    #[arg(short, long, value_enum)]
    scheme: Option<Scheme>,

    /// List available color schemes with descriptions and exit.
    #[arg(long)]
    list_schemes: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list_schemes {
        println!("Available color schemes:\n");
        for scheme in Scheme::ALL {
            println!("  {:<17} {}", scheme.name(), scheme.description());
        }
        return Ok(());
    }

    init_logging(cli.log_file.as_deref())?;

    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let scheme = match cli.scheme {
        Some(s) => s,
        None => Scheme::from_name(&cfg.scheme.name).unwrap_or_else(|| {
            warn!(
                name = %cfg.scheme.name,
                "unknown scheme in config, falling back to dominant_bg"
            );
            Scheme::default()
        }),
    };
    info!(scheme = scheme.name(), "using color scheme");

    let conn = zbus::Connection::session()
        .await
        .context("connect to session bus")?;
    let app = app::App::new(&cfg, scheme, &conn).await?;
    app.run(&conn).await
}

fn init_logging(log_file: Option<&std::path::Path>) -> anyhow::Result<()> {
    match log_file {
        Some(path) => {
            let file = std::fs::File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .with_ansi(false)
                .with_writer(std::sync::Arc::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_level(true)
                .init();
        }
    }
    Ok(())
}
