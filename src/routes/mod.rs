pub mod admin_route;
pub mod poll_route;
