use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct NewRoomSchema {
    pub room_id: String,
    pub room_name: Option<String>,
}
