pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod types;
pub mod vendor;

pub use app::{app, AppState};

#[cfg(test)]
pub mod testing;
