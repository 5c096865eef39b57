use std::{collections::HashMap, pin::Pin, task::Poll};

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
};
use futures_util::{future::poll_fn, stream::SplitSink, SinkExt, Stream, StreamExt};
use jukebox_collab::{DispatchError, Dispatcher, MemberHandle, RoomEvent};
use jukebox_core::RoomId;
use log::warn;
use serde_json::json;

use crate::{context::ServerContext, Router};

type Outgoing = SplitSink<WebSocket, Message>;

/// The memberships held by one socket, keyed by room.
///
/// Re-joining a room replaces the previous membership; the old handle drops
/// and cleans itself up.
#[derive(Default)]
struct Memberships {
    handles: HashMap<RoomId, MemberHandle>,
}

impl Memberships {
    fn insert(&mut self, handle: MemberHandle) {
        self.handles.insert(handle.room_id().clone(), handle);
    }

    /// Waits for the next event from any membership. Pending forever while
    /// none exist, which makes it safe to park in a select.
    async fn next_event(&mut self) -> RoomEvent {
        poll_fn(|cx| {
            for handle in self.handles.values_mut() {
                if let Poll::Ready(Some(event)) = Pin::new(handle).poll_next(cx) {
                    return Poll::Ready(event);
                }
            }

            Poll::Pending
        })
        .await
    }
}

async fn gateway(ws: WebSocketUpgrade, State(context): State<ServerContext>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, context))
}

/// Drives one socket: inbound frames become actions, room events become
/// outbound frames. Closing the socket drops every membership it held.
async fn handle_socket(socket: WebSocket, context: ServerContext) {
    let (mut outgoing, mut incoming) = socket.split();
    let mut memberships = Memberships::default();

    loop {
        tokio::select! {
            event = memberships.next_event() => {
                if send_event(&mut outgoing, &event).await.is_err() {
                    break;
                }
            }
            message = incoming.next() => match message {
                Some(Ok(Message::Text(frame))) => {
                    match handle_frame(&context, &frame) {
                        Ok(Some(handle)) => memberships.insert(handle),
                        Ok(None) => {}
                        Err(err) => {
                            // Failures concern the sender alone
                            if send_error(&mut outgoing, &err).await.is_err() {
                                break;
                            }
                        }
                    }
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    warn!("Socket error: {}", err);
                    break;
                }
            }
        }
    }
}

fn handle_frame(
    context: &ServerContext,
    frame: &str,
) -> Result<Option<MemberHandle>, DispatchError> {
    let action = Dispatcher::parse(frame)?;
    context.jukebox.dispatcher.dispatch(action)
}

async fn send_event(outgoing: &mut Outgoing, event: &RoomEvent) -> Result<(), axum::Error> {
    let frame = serde_json::to_string(event).expect("serializes properly");
    outgoing.send(Message::Text(frame)).await
}

async fn send_error(outgoing: &mut Outgoing, error: &DispatchError) -> Result<(), axum::Error> {
    let frame = json!({
        "type": "error",
        "message": error.to_string(),
    });

    outgoing.send(Message::Text(frame.to_string())).await
}

pub fn router() -> Router {
    Router::new().route("/", get(gateway))
}
