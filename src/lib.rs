pub mod api;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod service;

pub use api::{router, AppState};
pub use config::AppConfig;
pub use error::{AppError, ParseError};
pub use service::{ChartBuilder, UploadService};
