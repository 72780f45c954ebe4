pub mod config;
mod http_layers;
pub mod response;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use response::{ApiError, ApiResponse};
pub use server::{make_app, run_server};
