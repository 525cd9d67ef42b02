pub mod config;
pub mod controller;
pub mod extract;
pub mod response;
