//! All schemas that are exposed from endpoints are defined here
//! along with the conversion impls

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jukebox_collab::{Room as CollabRoom, RoomSnapshot};
use jukebox_core::Item;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Room {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct Queue {
    queue: Vec<Item>,
    current_song: Option<Item>,
}

/// Helper trait to convert any type into a serialized version
pub trait ToSerialized<T>
where
    T: Serialize,
{
    fn to_serialized(&self) -> T;
}

impl ToSerialized<Room> for Arc<CollabRoom> {
    fn to_serialized(&self) -> Room {
        let data = self.data();

        Room {
            id: data.id.clone(),
            name: data.name.clone(),
            created_at: data.created_at,
        }
    }
}

impl ToSerialized<Queue> for RoomSnapshot {
    fn to_serialized(&self) -> Queue {
        Queue {
            queue: self.queue.clone(),
            current_song: self.current_item.clone(),
        }
    }
}
