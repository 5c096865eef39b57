use chrono::{DateTime, Utc};
use jukebox_core::RoomId;

/// A jukebox room
#[derive(Debug, Clone)]
pub struct RoomData {
    /// The externally supplied key identifying the room
    pub id: RoomId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
