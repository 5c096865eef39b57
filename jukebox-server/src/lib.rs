mod context;
mod errors;
mod gateway;
mod logging;
mod rooms;
mod schemas;
mod serialized;

use std::{
    env,
    net::{Ipv6Addr, SocketAddr},
    sync::Arc,
};

use jukebox_collab::Jukebox;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

pub use context::ServerContext;
pub use logging::init_logger;

/// The default port the server will listen on.
pub const DEFAULT_PORT: u16 = 5000;

pub type Router = axum::Router<ServerContext>;

/// Starts the jukebox server
pub async fn run_server(jukebox: Arc<Jukebox>) {
    let port = env::var("JUKEBOX_SERVER_PORT")
        .map(|x| x.parse::<u16>().expect("Port must be a number"))
        .unwrap_or(DEFAULT_PORT);

    let addr: SocketAddr = (Ipv6Addr::UNSPECIFIED, port).into();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let context = ServerContext { jukebox };

    let version_one_router = Router::new()
        .nest("/rooms", rooms::router())
        .nest("/gateway", gateway::router());

    let root_router = Router::new()
        .nest("/v1", version_one_router)
        .layer(cors)
        .with_state(context);

    let listener = TcpListener::bind(&addr).await.expect("listens on address");

    info!("Listening on port {}", port);

    axum::serve(listener, root_router.into_make_service())
        .await
        .expect("server runs");
}
