mod playback;
mod ranking;
mod store;
mod util;
mod voting;

pub use playback::*;
pub use ranking::*;
pub use store::*;
pub use util::*;
pub use voting::*;
