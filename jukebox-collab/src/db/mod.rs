use thiserror::Error;

mod data;
pub use data::*;

mod memory;
pub use memory::*;

use jukebox_core::{Item, ItemId, RoomId};

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    /// An unknown or internal error happened with the backing store
    #[error("storage error: {0}")]
    Internal(String),
}

/// Represents a type that durably mirrors jukebox state.
///
/// Implementations are called synchronously, always under the owning room's
/// serialization boundary, and only need read-your-writes consistency within
/// a single room.
pub trait Storage: Send + Sync {
    /// Creates the room if it doesn't exist yet. Must be idempotent.
    fn upsert_room(&self, room: &RoomData) -> Result<()>;

    /// Appends a newly submitted item. Items are never deleted.
    fn insert_item(&self, item: &Item) -> Result<()>;

    fn update_item_votes(&self, item_id: ItemId, votes: i32) -> Result<()>;

    fn mark_item_played(&self, item_id: ItemId) -> Result<()>;

    fn set_current_item(&self, room_id: &RoomId, item_id: Option<ItemId>) -> Result<()>;
}

impl<S> Storage for std::sync::Arc<S>
where
    S: Storage,
{
    fn upsert_room(&self, room: &RoomData) -> Result<()> {
        self.as_ref().upsert_room(room)
    }

    fn insert_item(&self, item: &Item) -> Result<()> {
        self.as_ref().insert_item(item)
    }

    fn update_item_votes(&self, item_id: ItemId, votes: i32) -> Result<()> {
        self.as_ref().update_item_votes(item_id, votes)
    }

    fn mark_item_played(&self, item_id: ItemId) -> Result<()> {
        self.as_ref().mark_item_played(item_id)
    }

    fn set_current_item(&self, room_id: &RoomId, item_id: Option<ItemId>) -> Result<()> {
        self.as_ref().set_current_item(room_id, item_id)
    }
}
