pub mod app_state;
pub mod game_over;
pub mod messages;
pub mod player;
pub mod setup;
pub mod snapshot;

// Re-export important types
pub use app_state::*;
pub use game_over::*;
pub use messages::*;
pub use player::*;
pub use setup::*;
pub use snapshot::*;
