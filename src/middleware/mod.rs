pub mod availability;
pub mod error_handler;
pub mod not_found;
