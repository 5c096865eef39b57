use std::collections::HashMap;

use jukebox_core::{Item, ItemId, RoomId};
use parking_lot::RwLock;

use super::{Result, RoomData, Storage, StorageError};

/// Keeps the durable mirror in process memory.
///
/// This is the default backing store. Anything that should outlive the
/// process is an external concern behind [Storage].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    rooms: RwLock<HashMap<RoomId, StoredRoom>>,
    items: RwLock<HashMap<ItemId, Item>>,
}

#[derive(Debug, Clone)]
struct StoredRoom {
    data: RoomData,
    current_item: Option<ItemId>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a stored room's data, if known.
    pub fn room(&self, room_id: &str) -> Option<RoomData> {
        self.rooms.read().get(room_id).map(|r| r.data.clone())
    }

    /// Returns a stored item, if known.
    pub fn item(&self, item_id: ItemId) -> Option<Item> {
        self.items.read().get(&item_id).cloned()
    }

    /// Returns the stored current-item pointer of a room.
    pub fn current_item_of(&self, room_id: &str) -> Option<ItemId> {
        self.rooms.read().get(room_id).and_then(|r| r.current_item)
    }
}

impl Storage for MemoryStorage {
    fn upsert_room(&self, room: &RoomData) -> Result<()> {
        self.rooms
            .write()
            .entry(room.id.clone())
            .or_insert_with(|| StoredRoom {
                data: room.clone(),
                current_item: None,
            });

        Ok(())
    }

    fn insert_item(&self, item: &Item) -> Result<()> {
        self.items.write().insert(item.id, item.clone());
        Ok(())
    }

    fn update_item_votes(&self, item_id: ItemId, votes: i32) -> Result<()> {
        let mut items = self.items.write();
        let item = items
            .get_mut(&item_id)
            .ok_or_else(|| StorageError::Internal(format!("item:{} is not stored", item_id)))?;

        item.votes = votes;
        Ok(())
    }

    fn mark_item_played(&self, item_id: ItemId) -> Result<()> {
        let mut items = self.items.write();
        let item = items
            .get_mut(&item_id)
            .ok_or_else(|| StorageError::Internal(format!("item:{} is not stored", item_id)))?;

        item.played = true;
        Ok(())
    }

    fn set_current_item(&self, room_id: &RoomId, item_id: Option<ItemId>) -> Result<()> {
        let mut rooms = self.rooms.write();
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| StorageError::Internal(format!("room:{} is not stored", room_id)))?;

        room.current_item = item_id;
        Ok(())
    }
}
