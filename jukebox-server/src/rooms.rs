use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json,
};

use crate::{
    context::ServerContext,
    errors::{ServerError, ServerResult},
    schemas::NewRoomSchema,
    serialized::{Queue, Room, ToSerialized},
    Router,
};

async fn list_rooms(State(context): State<ServerContext>) -> Json<Vec<Room>> {
    let rooms: Vec<_> = context
        .jukebox
        .rooms
        .list_all()
        .into_iter()
        .map(|r| r.to_serialized())
        .collect();

    Json(rooms)
}

/// Idempotent: referencing an existing id hands back that room.
async fn create_room(
    State(context): State<ServerContext>,
    Json(body): Json<NewRoomSchema>,
) -> ServerResult<Json<Room>> {
    let room = context
        .jukebox
        .rooms
        .get_or_create(&body.room_id, body.room_name)?;

    Ok(Json(room.to_serialized()))
}

async fn queue(
    State(context): State<ServerContext>,
    Path(room_id): Path<String>,
) -> ServerResult<Json<Queue>> {
    let room = context
        .jukebox
        .rooms
        .room_by_id(&room_id)
        .ok_or(ServerError::NotFound {
            resource: "room",
            identifier: room_id,
        })?;

    Ok(Json(room.snapshot().to_serialized()))
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_rooms))
        .route("/", post(create_room))
        .route("/:id/queue", get(queue))
}
