mod db;
mod dispatch;
mod events;
mod rooms;

use std::sync::Arc;

use dashmap::DashMap;
use jukebox_core::RoomId;

pub use db::*;
pub use dispatch::*;
pub use events::*;
pub use rooms::*;

// Reduces verbosity
type Store<K, T> = Arc<DashMap<K, Arc<T>>>;

/// The jukebox collab system, facilitating rooms, membership, and event
/// fan-out.
pub struct Jukebox {
    pub rooms: RoomManager,
    pub dispatcher: Dispatcher,
}

/// A type passed to various components of the collab system, to access
/// shared state.
pub struct JukeboxContext {
    pub storage: Arc<dyn Storage>,

    pub rooms: Store<RoomId, Room>,
}

impl Jukebox {
    pub fn new<S>(storage: S) -> Self
    where
        S: Storage + 'static,
    {
        let context = JukeboxContext {
            storage: Arc::new(storage),
            rooms: Default::default(),
        };

        let rooms = RoomManager::new(&context);
        let dispatcher = Dispatcher::new(&context);

        Self { rooms, dispatcher }
    }
}

impl Clone for JukeboxContext {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            rooms: self.rooms.clone(),
        }
    }
}
