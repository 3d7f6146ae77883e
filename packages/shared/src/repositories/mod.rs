pub mod errors;
pub mod room_repository;
