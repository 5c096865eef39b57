use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures_util::Stream;
use jukebox_core::{Id, RoomId};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::{events::RoomEvent, JukeboxContext};

pub type MemberId = Id<RoomMember>;

/// A connected participant of a room, addressable for broadcast.
///
/// Events go through an unbounded queue, so delivering to a slow consumer
/// never stalls the room.
#[derive(Debug)]
pub struct RoomMember {
    pub id: MemberId,
    pub username: String,
    sender: UnboundedSender<RoomEvent>,
}

/// The receiving end of a membership, handed to the transport layer.
///
/// Dropping the handle removes the member from its room.
pub struct MemberHandle {
    member_id: MemberId,
    room_id: RoomId,
    context: JukeboxContext,
    events: UnboundedReceiver<RoomEvent>,
}

impl RoomMember {
    pub(crate) fn create(
        context: &JukeboxContext,
        room_id: RoomId,
        username: &str,
    ) -> (Self, MemberHandle) {
        let (sender, events) = unbounded_channel();

        let member = Self {
            id: MemberId::new(),
            username: username.to_string(),
            sender,
        };

        let handle = MemberHandle {
            member_id: member.id,
            room_id,
            context: context.clone(),
            events,
        };

        (member, handle)
    }

    /// Queues an event for delivery. A member that went away is skipped.
    pub(crate) fn send(&self, event: RoomEvent) {
        let _ = self.sender.send(event);
    }
}

impl MemberHandle {
    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Receives the next event, waiting for one if none is queued.
    pub async fn recv(&mut self) -> Option<RoomEvent> {
        self.events.recv().await
    }

    /// Returns the next event if one is already queued.
    pub fn try_recv(&mut self) -> Option<RoomEvent> {
        self.events.try_recv().ok()
    }
}

impl Stream for MemberHandle {
    type Item = RoomEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.events.poll_recv(cx)
    }
}

impl Drop for MemberHandle {
    fn drop(&mut self) {
        if let Some(room) = self.context.rooms.get(&self.room_id) {
            room.remove_member(self.member_id);
        }
    }
}
