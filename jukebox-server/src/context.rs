use std::sync::Arc;

use jukebox_collab::Jukebox;

#[derive(Clone)]
pub struct ServerContext {
    pub jukebox: Arc<Jukebox>,
}
