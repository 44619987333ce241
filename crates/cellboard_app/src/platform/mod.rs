mod app;
mod config;
mod effects;
pub mod logging;
mod persistence;
mod ui;

pub use app::run_app;
pub use config::AppConfig;
