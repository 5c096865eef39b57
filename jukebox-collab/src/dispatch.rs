use jukebox_core::{ItemId, NewItem, RoomId, VoteDirection};
use serde::Deserialize;
use thiserror::Error;

use crate::{JukeboxContext, MemberHandle, RoomError, RoomManager};

/// An inbound member action, tagged the way it arrives on the wire.
///
/// Every action is scoped to exactly one room.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Join {
        room: RoomId,
        username: String,
    },
    AddSong {
        room: RoomId,
        title: String,
        artist: String,
        youtube_id: String,
        username: String,
    },
    Vote {
        room: RoomId,
        song_id: ItemId,
        vote_type: VoteDirection,
    },
    NextSong {
        room: RoomId,
    },
    ChatMessage {
        room: RoomId,
        username: String,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Room(#[from] RoomError),
    /// The inbound frame was malformed or missing a required field.
    /// Nothing was mutated and nothing was broadcast.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

/// Translates inbound actions into engine calls.
///
/// Errors go back to the originating member alone, never into the room.
pub struct Dispatcher {
    rooms: RoomManager,
}

impl Dispatcher {
    pub fn new(context: &JukeboxContext) -> Self {
        Self {
            rooms: RoomManager::new(context),
        }
    }

    /// Parses a raw frame into an [Action].
    pub fn parse(frame: &str) -> Result<Action, DispatchError> {
        serde_json::from_str(frame).map_err(|e| DispatchError::InvalidPayload(e.to_string()))
    }

    /// Performs an action. A join hands back the new membership's handle.
    ///
    /// Rooms come into existence on first reference, whichever action that
    /// happens to be.
    pub fn dispatch(&self, action: Action) -> Result<Option<MemberHandle>, DispatchError> {
        match action {
            Action::Join { room, username } => {
                let room = self.rooms.get_or_create(&room, None)?;
                Ok(Some(room.join(&username)))
            }
            Action::AddSong {
                room,
                title,
                artist,
                youtube_id,
                username,
            } => {
                let target = self.rooms.get_or_create(&room, None)?;

                target.add_item(NewItem {
                    room_id: room,
                    title,
                    artist,
                    youtube_id,
                    added_by: username,
                })?;

                Ok(None)
            }
            Action::Vote {
                room,
                song_id,
                vote_type,
            } => {
                self.rooms.get_or_create(&room, None)?.vote(song_id, vote_type)?;
                Ok(None)
            }
            Action::NextSong { room } => {
                self.rooms.get_or_create(&room, None)?.advance()?;
                Ok(None)
            }
            Action::ChatMessage {
                room,
                username,
                message,
            } => {
                self.rooms
                    .get_or_create(&room, None)?
                    .chat(&username, &message);

                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Action, DispatchError, Dispatcher};
    use crate::{Jukebox, MemoryStorage, RoomEvent};
    use jukebox_core::VoteDirection;

    fn jukebox() -> Jukebox {
        Jukebox::new(MemoryStorage::new())
    }

    #[test]
    fn frames_parse_into_actions() {
        let action = Dispatcher::parse(
            r#"{"action":"add_song","room":"r1","title":"A","artist":"B","youtube_id":"x","username":"mary"}"#,
        )
        .unwrap();
        assert!(matches!(action, Action::AddSong { .. }));

        let action =
            Dispatcher::parse(r#"{"action":"vote","room":"r1","song_id":3,"vote_type":"up"}"#)
                .unwrap();
        match action {
            Action::Vote {
                song_id, vote_type, ..
            } => {
                assert_eq!(song_id.value(), 3);
                assert_eq!(vote_type, VoteDirection::Up);
            }
            other => panic!("wrong action: {:?}", other),
        }

        let action = Dispatcher::parse(r#"{"action":"next_song","room":"r1"}"#).unwrap();
        assert!(matches!(action, Action::NextSong { .. }));
    }

    #[test]
    fn missing_fields_are_rejected() {
        // No username on a join
        let result = Dispatcher::parse(r#"{"action":"join","room":"r1"}"#);
        assert!(matches!(result, Err(DispatchError::InvalidPayload(_))));

        // Unknown action tag
        let result = Dispatcher::parse(r#"{"action":"self_destruct","room":"r1"}"#);
        assert!(matches!(result, Err(DispatchError::InvalidPayload(_))));

        // Not even json
        let result = Dispatcher::parse("next song please");
        assert!(matches!(result, Err(DispatchError::InvalidPayload(_))));
    }

    #[test]
    fn join_returns_a_handle_and_creates_the_room() {
        let jukebox = jukebox();

        let handle = jukebox
            .dispatcher
            .dispatch(Action::Join {
                room: "r1".to_string(),
                username: "mary".to_string(),
            })
            .unwrap()
            .expect("a join yields a handle");

        assert_eq!(handle.room_id(), "r1");
        assert!(jukebox.rooms.room_by_id("r1").is_some());
    }

    #[test]
    fn dispatched_actions_flow_through_the_room() {
        let jukebox = jukebox();

        let mut mary = jukebox
            .dispatcher
            .dispatch(Action::Join {
                room: "r1".to_string(),
                username: "mary".to_string(),
            })
            .unwrap()
            .unwrap();
        while mary.try_recv().is_some() {}

        jukebox
            .dispatcher
            .dispatch(Action::AddSong {
                room: "r1".to_string(),
                title: "A".to_string(),
                artist: "B".to_string(),
                youtube_id: "x".to_string(),
                username: "john".to_string(),
            })
            .unwrap();

        // Auto-play on the empty room, then the queue refresh
        assert!(matches!(
            mary.try_recv(),
            Some(RoomEvent::NowPlaying { item: Some(_) })
        ));
        assert!(matches!(
            mary.try_recv(),
            Some(RoomEvent::QueueUpdate { .. })
        ));
    }

    #[test]
    fn vote_on_unknown_item_reaches_only_the_voter() {
        let jukebox = jukebox();

        let mut mary = jukebox
            .dispatcher
            .dispatch(Action::Join {
                room: "r1".to_string(),
                username: "mary".to_string(),
            })
            .unwrap()
            .unwrap();
        while mary.try_recv().is_some() {}

        let result = jukebox.dispatcher.dispatch(Action::Vote {
            room: "r1".to_string(),
            song_id: jukebox_core::ItemId::new(),
            vote_type: VoteDirection::Down,
        });

        assert!(result.is_err());
        assert!(mary.try_recv().is_none());
    }
}
