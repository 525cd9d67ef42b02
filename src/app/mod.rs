pub mod controller;
pub mod entity;
pub mod request;
pub mod response;
pub mod state;
pub mod store;
