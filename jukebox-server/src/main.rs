use std::sync::Arc;

use jukebox_collab::{Jukebox, MemoryStorage};
use jukebox_server::{init_logger, run_server};

#[tokio::main]
async fn main() {
    init_logger();

    let jukebox = Arc::new(Jukebox::new(MemoryStorage::new()));

    run_server(jukebox).await
}
