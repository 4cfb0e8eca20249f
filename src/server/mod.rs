mod catalog_routes;
pub mod config;
mod forms;
mod http_layers;
mod join_routes;
mod music_routes;
mod outcome;
mod params;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
