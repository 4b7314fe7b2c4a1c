pub mod app;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod render;
pub mod state;
pub mod ui;
pub mod unwrap;
pub mod views;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use unwrap::{Extraction, ResponseUnwrapper};
