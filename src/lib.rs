pub mod commands;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod services;
pub mod utils;
