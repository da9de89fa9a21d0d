use std::collections::HashMap;

use zbus::zvariant::OwnedValue;
use zbus::{Connection, MatchRule, Message, MessageStream, message};

/// All MPRIS players share this object path; subscribing by path (no sender)
/// covers every player on the bus.
pub const MPRIS_PATH: &str = "/org/mpris/MediaPlayer2";
pub const PLAYER_INTERFACE: &str = "org.mpris.MediaPlayer2.Player";

const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";
const PROPERTIES_CHANGED: &str = "PropertiesChanged";

/// A qualifying track change: new cover art plus the display title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackChange {
    pub art_url: String,
    pub title: String,
}

/// Subscribe to `PropertiesChanged` signals at the MPRIS path from any
/// player. The returned stream delivers signals one at a time; handling is
/// run-to-completion, so events are naturally serialized.
pub async fn subscribe(conn: &Connection) -> zbus::Result<MessageStream> {
    let rule = MatchRule::builder()
        .msg_type(message::Type::Signal)
        .interface(PROPERTIES_INTERFACE)?
        .member(PROPERTIES_CHANGED)?
        .path(MPRIS_PATH)?
        .build();
    MessageStream::for_match_rule(rule, conn, None).await
}

/// Decode one bus message into a `TrackChange`, or `None` for anything that
/// does not qualify (wrong signal, wrong property interface, no `Metadata`
/// entry, no cover-art URL). Non-qualifying messages are a no-op for the
/// event loop.
pub fn parse_signal(msg: &Message) -> Option<TrackChange> {
    let header = msg.header();
    if header.member().map(|m| m.as_str()) != Some(PROPERTIES_CHANGED) {
        return None;
    }
    let (interface, changed, _invalidated): (String, HashMap<String, OwnedValue>, Vec<String>) =
        msg.body().deserialize().ok()?;
    track_change(&interface, changed)
}

/// The filter itself, split out from message decoding so it is testable
/// without a bus.
pub fn track_change(
    interface: &str,
    mut changed: HashMap<String, OwnedValue>,
) -> Option<TrackChange> {
    if interface != PLAYER_INTERFACE {
        return None;
    }
    let metadata = changed.remove("Metadata")?;
    let mut metadata = HashMap::<String, OwnedValue>::try_from(metadata).ok()?;
    let art_url = metadata
        .remove("mpris:artUrl")
        .and_then(|v| String::try_from(v).ok())?;
    let title = metadata
        .remove("xesam:title")
        .and_then(|v| String::try_from(v).ok())
        .unwrap_or_else(|| "Unknown".to_string());
    Some(TrackChange { art_url, title })
}
