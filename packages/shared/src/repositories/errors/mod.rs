pub mod room_repository_errors;
