use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::Id;

/// The key identifying a room, supplied by whoever first references it.
pub type RoomId = String;

pub type ItemId = Id<Item>;

/// A submitted playback entry belonging to a room.
///
/// Items are append-only history: once created they are voted on and
/// eventually marked played, never removed.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub room_id: RoomId,
    pub title: String,
    pub artist: String,
    pub youtube_id: String,
    pub added_by: String,
    pub votes: i32,
    /// Set once by an advance transition, never reverts
    pub played: bool,
    pub created_at: DateTime<Utc>,
}

/// The caller-supplied fields of a new item.
#[derive(Debug)]
pub struct NewItem {
    pub room_id: RoomId,
    pub title: String,
    pub artist: String,
    pub youtube_id: String,
    pub added_by: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("item:{0} doesn't exist")]
    ItemNotFound(ItemId),
}

/// Holds every item ever submitted to one room, played or not.
///
/// The store hands out snapshots without any ordering promise, see [rank].
#[derive(Debug, Default)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Adds a new item with a fresh id, zero votes, and the current time.
    pub fn create(&mut self, new_item: NewItem) -> Item {
        let item = Item {
            id: ItemId::new(),
            room_id: new_item.room_id,
            title: new_item.title,
            artist: new_item.artist,
            youtube_id: new_item.youtube_id,
            added_by: new_item.added_by,
            votes: 0,
            played: false,
            created_at: Utc::now(),
        };

        self.items.push(item.clone());
        item
    }

    pub fn get(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub(crate) fn get_mut(&mut self, item_id: ItemId) -> Result<&mut Item, StoreError> {
        self.items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(StoreError::ItemNotFound(item_id))
    }

    /// Marks an item as played. Re-marking a played item is a no-op.
    pub fn mark_played(&mut self, item_id: ItemId) -> Result<(), StoreError> {
        self.get_mut(item_id)?.played = true;
        Ok(())
    }

    /// Returns a snapshot of the items that have not been played yet.
    pub fn unplayed(&self) -> Vec<Item> {
        self.items.iter().filter(|i| !i.played).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
impl NewItem {
    pub(crate) fn mock(title: &str) -> Self {
        Self {
            room_id: "test-room".to_string(),
            title: title.to_string(),
            artist: "Unknown Artist".to_string(),
            youtube_id: "dQw4w9WgXcQ".to_string(),
            added_by: "john".to_string(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ItemStore, NewItem, StoreError};
    use crate::ItemId;

    #[test]
    fn create_assigns_increasing_ids() {
        let mut store = ItemStore::default();

        let first = store.create(NewItem::mock("strawberries"));
        let second = store.create(NewItem::mock("bananas"));

        assert!(second.id > first.id);
        assert_eq!(first.votes, 0);
        assert!(!first.played);
    }

    #[test]
    fn mark_played_is_idempotent() {
        let mut store = ItemStore::default();
        let item = store.create(NewItem::mock("apples"));

        store.mark_played(item.id).unwrap();
        store.mark_played(item.id).unwrap();

        assert!(store.get(item.id).unwrap().played);
    }

    #[test]
    fn mark_played_requires_an_existing_item() {
        let mut store = ItemStore::default();
        let unknown = ItemId::new();

        assert_eq!(
            store.mark_played(unknown),
            Err(StoreError::ItemNotFound(unknown))
        );
    }

    #[test]
    fn unplayed_excludes_consumed_items() {
        let mut store = ItemStore::default();

        let first = store.create(NewItem::mock("windows"));
        let second = store.create(NewItem::mock("linux"));

        store.mark_played(first.id).unwrap();

        let unplayed = store.unplayed();
        assert_eq!(unplayed.len(), 1);
        assert_eq!(unplayed[0].id, second.id);
        assert_eq!(store.len(), 2);
    }
}
