pub mod audit;
pub mod auth;
pub mod error;
pub mod rest;
pub mod server;

pub use server::ApiServer;
