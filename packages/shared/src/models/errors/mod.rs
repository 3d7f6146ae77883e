pub mod board_errors;
