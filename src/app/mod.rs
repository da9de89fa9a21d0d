use std::path::PathBuf;

use anyhow::Context;
use futures_util::StreamExt;
use tracing::{debug, info, warn};
use zbus::Connection;

use crate::cavasik::ColorSetter;
use crate::config::Config;
use crate::extract::Extractor;
use crate::mpris::{self, TrackChange};
use crate::output;
use crate::scheme::{self, Scheme};

/// The long-lived sync loop: one `TrackChange` in flight at a time, each
/// handled to completion before the next signal is looked at.
pub struct App {
    scheme: Scheme,
    extractor: Extractor,
    setter: ColorSetter,
    fg_path: PathBuf,
    bg_path: PathBuf,
}

impl App {
    pub async fn new(cfg: &Config, scheme: Scheme, conn: &Connection) -> anyhow::Result<Self> {
        let data_dir = &cfg.paths.data_dir;
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("create data dir {}", data_dir.display()))?;

        let extractor = Extractor::new(data_dir.join("covers"))?;
        let setter = ColorSetter::new(conn).await?;

        Ok(Self {
            scheme,
            extractor,
            setter,
            fg_path: output::fg_path(data_dir),
            bg_path: output::bg_path(data_dir),
        })
    }

    /// Dispatch bus signals until interrupted. Handler failures are logged
    /// and skipped; the subscription outlives them all.
    pub async fn run(&self, conn: &Connection) -> anyhow::Result<()> {
        let mut stream = mpris::subscribe(conn).await?;
        info!("monitoring MPRIS players for track changes");

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, shutting down");
                    return Ok(());
                }
                msg = stream.next() => {
                    let Some(msg) = msg else {
                        anyhow::bail!("session bus signal stream closed");
                    };
                    let msg = match msg {
                        Ok(m) => m,
                        Err(e) => {
                            warn!(error = %e, "dropping unreadable bus message");
                            continue;
                        }
                    };
                    if let Some(change) = mpris::parse_signal(&msg) {
                        self.handle_track_change(change).await;
                    }
                }
            }
        }
    }

    /// One qualifying event, run to completion: extract, transform, write
    /// both files, push to Cavasik. Every stage failure downgrades the event
    /// to a no-op.
    async fn handle_track_change(&self, change: TrackChange) {
        info!(title = %change.title, art_url = %change.art_url, "track changed");

        let palette = match self.extractor.extract(&change.art_url).await {
            Ok(p) if !p.is_empty() => p,
            Ok(_) => {
                warn!("cover art produced an empty palette, skipping");
                return;
            }
            Err(e) => {
                warn!(error = %e, "cover art extraction failed, skipping");
                return;
            }
        };
        debug!(colors = palette.len(), "extracted palette");

        let (fg, bg) = scheme::transform(&palette, self.scheme);

        if let Err(e) = output::write_colors(&self.fg_path, &fg) {
            warn!(error = %e, "foreground file write failed, skipping");
            return;
        }
        if let Err(e) = output::write_colors(&self.bg_path, &bg) {
            warn!(error = %e, "background file write failed, skipping");
            return;
        }

        match self.setter.apply(&self.fg_path, &self.bg_path).await {
            Ok((true, true)) => info!(scheme = self.scheme.name(), "cavasik colors updated"),
            Ok((fg_ok, bg_ok)) => {
                warn!(fg_ok, bg_ok, "cavasik rejected one or both color files");
            }
            Err(e) => warn!(error = %e, "cavasik call failed"),
        }
    }
}
