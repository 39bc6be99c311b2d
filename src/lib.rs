pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;
pub mod validation;

pub use server::{app, build_state};
pub use state::AppState;
