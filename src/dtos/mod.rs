pub mod pages;
pub mod requests;
pub mod responses;
