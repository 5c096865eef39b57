mod member;
mod room;

use std::sync::Arc;

use chrono::Utc;
use log::info;
use thiserror::Error;

use crate::{JukeboxContext, RoomData, StorageError};
use jukebox_core::StoreError;

pub use member::*;
pub use room::*;

/// The display name given to rooms created by first reference.
pub const DEFAULT_ROOM_NAME: &str = "Community Jukebox";

pub struct RoomManager {
    context: JukeboxContext,
}

#[derive(Debug, Error)]
pub enum RoomError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RoomManager {
    pub fn new(context: &JukeboxContext) -> Self {
        Self {
            context: context.clone(),
        }
    }

    /// Returns the room with the given id, creating it if this is the first
    /// reference to it.
    ///
    /// Creation is idempotent. Concurrent callers racing on a fresh id all
    /// end up with the same room.
    pub fn get_or_create(
        &self,
        room_id: &str,
        name: Option<String>,
    ) -> Result<Arc<Room>, RoomError> {
        if let Some(room) = self.context.rooms.get(room_id) {
            return Ok(room.clone());
        }

        let data = RoomData {
            id: room_id.to_string(),
            name: name.unwrap_or_else(|| DEFAULT_ROOM_NAME.to_string()),
            created_at: Utc::now(),
        };

        self.context.storage.upsert_room(&data)?;

        let room = self
            .context
            .rooms
            .entry(room_id.to_string())
            .or_insert_with(|| {
                info!("Room {} created", room_id);
                Arc::new(Room::new(&self.context, data))
            })
            .clone();

        Ok(room)
    }

    /// Returns an existing room without creating it.
    pub fn room_by_id(&self, room_id: &str) -> Option<Arc<Room>> {
        self.context.rooms.get(room_id).map(|r| r.clone())
    }

    /// Get all rooms in memory
    pub fn list_all(&self) -> Vec<Arc<Room>> {
        self.context.rooms.iter().map(|r| r.clone()).collect()
    }
}
