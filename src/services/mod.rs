pub mod admin_service;
pub mod poll_service;
