pub mod ai_service;
pub mod errors;
pub mod game_summary_service;
pub mod matchmaking_service;
pub mod othello_service;
pub mod session_store;
