pub mod audio_player;
pub use audio_player::*;
