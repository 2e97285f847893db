pub extern crate actix_web;

pub mod admin;
pub mod config;
pub mod connection;
pub mod connection_registry;
pub mod connection_tx_storage;
pub mod handlers;
pub mod handoff;
pub mod lifecycle;
pub mod presence;
pub mod relay;
pub mod server;
pub mod server_state;
mod session;
pub mod session_directory;

pub use session::Session;
