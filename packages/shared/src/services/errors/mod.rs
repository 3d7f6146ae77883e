pub mod matchmaking_service_errors;
pub mod othello_service_errors;
pub mod session_store_errors;
