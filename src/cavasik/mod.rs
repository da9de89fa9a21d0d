use std::path::Path;

use zbus::{Connection, proxy};

use crate::error::SyncError;

/// Cavasik's D-Bus surface. The method names are lowercase on the wire,
/// hence the explicit name overrides.
#[proxy(
    interface = "io.github.TheWisker.Cavasik",
    default_service = "io.github.TheWisker.Cavasik",
    default_path = "/io/github/TheWisker/Cavasik",
    gen_blocking = false
)]
pub trait Cavasik {
    #[zbus(name = "set_fg_colors")]
    fn set_fg_colors(&self, path: &str) -> zbus::Result<bool>;

    #[zbus(name = "set_bg_colors")]
    fn set_bg_colors(&self, path: &str) -> zbus::Result<bool>;
}

/// Pushes the written color files to a running Cavasik instance.
pub struct ColorSetter {
    proxy: CavasikProxy<'static>,
}

impl ColorSetter {
    pub async fn new(conn: &Connection) -> Result<Self, SyncError> {
        let proxy = CavasikProxy::new(conn).await?;
        Ok(Self { proxy })
    }

    /// Apply both files, foreground first. Returns Cavasik's own accepted
    /// flags; a bus-level failure on either call aborts with `Remote` (both
    /// sides then count as failed). No retry, the event is done either way.
    pub async fn apply(&self, fg_path: &Path, bg_path: &Path) -> Result<(bool, bool), SyncError> {
        let fg_ok = self
            .proxy
            .set_fg_colors(&fg_path.to_string_lossy())
            .await?;
        let bg_ok = self
            .proxy
            .set_bg_colors(&bg_path.to_string_lossy())
            .await?;
        Ok((fg_ok, bg_ok))
    }
}
