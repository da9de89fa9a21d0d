use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while handling one track change.
///
/// Each variant is caught at the event-loop boundary, logged, and turned into
/// "skip this event"; none of them take the loop down. Config problems are
/// not represented here because loading recovers to defaults in place.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("failed to fetch cover art from {uri}")]
    Fetch {
        uri: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to decode cover art from {uri}")]
    Decode {
        uri: String,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cavasik remote call failed")]
    Remote(#[from] zbus::Error),
}
