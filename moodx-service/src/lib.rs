pub mod models;
pub mod render;
pub mod service;
pub mod telemetry;

pub use service::{AppState, build_router};
pub use telemetry::{init_cli_tracing, init_tracing};
