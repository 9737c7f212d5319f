pub mod admin_controller;
pub mod poll_controller;
