use chrono::Utc;
use jukebox_core::{Item, ItemId, ItemStore, NewItem, Playback, RoomId, VoteDirection};
use log::info;
use parking_lot::Mutex;

use crate::{events::RoomEvent, JukeboxContext, RoomData};

use super::{MemberHandle, MemberId, RoomError, RoomMember};

/// A jukebox room, containing members, a queue of items, and playback state.
///
/// Everything that can change ordering or the current item runs while the
/// session lock is held, so members only ever observe whole transitions.
pub struct Room {
    context: JukeboxContext,
    data: RoomData,
    session: Mutex<RoomSession>,
    /// The members currently connected to this room
    members: Mutex<Vec<RoomMember>>,
}

/// The per-room engine state behind the serialization boundary.
#[derive(Default)]
struct RoomSession {
    store: ItemStore,
    playback: Playback,
}

/// The just-in-time view of a room, as handed to a joining member.
#[derive(Debug, Clone)]
pub struct RoomSnapshot {
    pub queue: Vec<Item>,
    pub current_item: Option<Item>,
}

impl Room {
    pub fn new(context: &JukeboxContext, data: RoomData) -> Self {
        Self {
            context: context.clone(),
            data,
            session: Default::default(),
            members: Default::default(),
        }
    }

    pub fn id(&self) -> RoomId {
        self.data.id.clone()
    }

    pub fn data(&self) -> &RoomData {
        &self.data
    }

    /// Registers a new member and returns its handle.
    ///
    /// The joiner gets the current state queued privately before anyone else
    /// hears about the join, so it can render without waiting for the next
    /// mutation. Everyone already present gets a join notice instead.
    pub fn join(&self, username: &str) -> MemberHandle {
        let session = self.session.lock();

        let (member, handle) = RoomMember::create(&self.context, self.id(), username);
        let member_id = member.id;

        member.send(RoomEvent::QueueUpdate {
            queue: session.playback.queue(&session.store),
        });
        member.send(RoomEvent::NowPlaying {
            item: session.playback.current_item(&session.store),
        });

        self.members.lock().push(member);

        self.broadcast_except(
            RoomEvent::UserJoined {
                username: username.to_string(),
                message: format!("{} joined the room", username),
            },
            Some(member_id),
        );

        info!("{} joined room {}", username, self.data.name);

        handle
    }

    /// Called when a [MemberHandle] is dropped. Removing a member that is
    /// already gone is a no-op.
    pub fn remove_member(&self, member_id: MemberId) {
        let mut members = self.members.lock();

        let leaving = members
            .iter()
            .find(|m| m.id == member_id)
            .map(|m| m.username.clone());

        members.retain(|m| m.id != member_id);

        if let Some(username) = leaving {
            info!("{} left room {}", username, self.data.name);
        }
    }

    pub fn member_count(&self) -> usize {
        self.members.lock().len()
    }

    /// Submits an item to the room.
    ///
    /// If nothing is playing the new item becomes current right away and the
    /// room hears about it; in every case the ranked queue is re-broadcast.
    pub fn add_item(&self, new_item: NewItem) -> Result<Item, RoomError> {
        let mut session = self.session.lock();

        let item = session.store.create(new_item);
        self.context.storage.insert_item(&item)?;

        if session.playback.play_if_idle(&item) {
            self.context
                .storage
                .set_current_item(&self.data.id, Some(item.id))?;

            self.broadcast(RoomEvent::NowPlaying {
                item: Some(item.clone()),
            });
        }

        self.broadcast(RoomEvent::QueueUpdate {
            queue: session.playback.queue(&session.store),
        });

        Ok(item)
    }

    /// Applies a vote and returns the new score.
    ///
    /// A failed vote reaches nobody but the caller.
    pub fn vote(&self, item_id: ItemId, direction: VoteDirection) -> Result<i32, RoomError> {
        let mut session = self.session.lock();

        let votes = session.store.apply_vote(item_id, direction)?;
        self.context.storage.update_item_votes(item_id, votes)?;

        self.broadcast(RoomEvent::QueueUpdate {
            queue: session.playback.queue(&session.store),
        });

        Ok(votes)
    }

    /// Moves playback to the next ranked item, if any.
    pub fn advance(&self) -> Result<Option<Item>, RoomError> {
        let mut session = self.session.lock();

        let previous = session.playback.current_id();

        let next = {
            let RoomSession { store, playback } = &mut *session;
            playback.advance(store)?
        };

        if let Some(item_id) = previous {
            self.context.storage.mark_item_played(item_id)?;
        }
        self.context
            .storage
            .set_current_item(&self.data.id, next.as_ref().map(|i| i.id))?;

        self.broadcast(RoomEvent::NowPlaying { item: next.clone() });
        self.broadcast(RoomEvent::QueueUpdate {
            queue: session.playback.queue(&session.store),
        });

        Ok(next)
    }

    /// Relays a chat line to everyone in the room.
    ///
    /// Chat mutates nothing, but still takes the session lock so relayed
    /// lines never land in the middle of another action's event sequence.
    pub fn chat(&self, username: &str, message: &str) {
        let _session = self.session.lock();

        self.broadcast(RoomEvent::ChatMessage {
            username: username.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        });
    }

    /// Returns the current queue and item without registering anything.
    pub fn snapshot(&self) -> RoomSnapshot {
        let session = self.session.lock();

        RoomSnapshot {
            queue: session.playback.queue(&session.store),
            current_item: session.playback.current_item(&session.store),
        }
    }

    fn broadcast(&self, event: RoomEvent) {
        self.broadcast_except(event, None);
    }

    /// Delivers an event to every member's outbound queue, minus the
    /// excluded one. A room without members swallows the event.
    fn broadcast_except(&self, event: RoomEvent, except: Option<MemberId>) {
        let members = self.members.lock();

        for member in members.iter().filter(|m| Some(m.id) != except) {
            member.send(event.clone());
        }
    }
}
