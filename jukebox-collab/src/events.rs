use chrono::{DateTime, Utc};
use jukebox_core::Item;
use serde::Serialize;

/// Events fanned out to the members of a room.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomEvent {
    /// The ranked queue changed. The current item is never part of it.
    QueueUpdate { queue: Vec<Item> },
    /// The current item of the room changed
    NowPlaying { item: Option<Item> },
    /// Someone joined the room. The joiner itself never receives this.
    UserJoined { username: String, message: String },
    /// A relayed chat line, timestamped on arrival
    ChatMessage {
        username: String,
        message: String,
        timestamp: DateTime<Utc>,
    },
}

#[cfg(test)]
mod test {
    use super::RoomEvent;
    use chrono::Utc;

    #[test]
    fn events_are_tagged_with_their_wire_name() {
        let event = RoomEvent::NowPlaying { item: None };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "now_playing");
        assert!(json["item"].is_null());

        let event = RoomEvent::ChatMessage {
            username: "mary".to_string(),
            message: "hello".to_string(),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "chat_message");
        assert_eq!(json["username"], "mary");
        assert!(json["timestamp"].is_string());

        let event = RoomEvent::QueueUpdate { queue: vec![] };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "queue_update");
        assert!(json["queue"].as_array().unwrap().is_empty());
    }
}
