pub mod board;
pub mod errors;
pub mod game_mode;
pub mod game_state;
pub mod game_summary;
pub mod participant;
pub mod rank;
pub mod room;
