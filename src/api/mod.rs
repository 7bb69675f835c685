pub mod handlers;

pub use handlers::{chart, health_check, index, upload_file};

use crate::config::AppConfig;
use crate::ingest::UploadStore;
use crate::service::{ChartBuilder, UploadService};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// 共享状态: 上传服务与图表服务
#[derive(Clone)]
pub struct AppState {
    pub uploads: Arc<UploadService>,
    pub charts: Arc<ChartBuilder>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        let store = UploadStore::new(config.upload.dir.clone());
        Self {
            uploads: Arc::new(UploadService::new(store, config.upload.preview_rows)),
            charts: Arc::new(ChartBuilder::new(config.chart.title.clone())),
            max_body_bytes: config.upload.max_body_bytes,
        }
    }
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    let upload_routes = Router::new()
        .route("/uploads", post(upload_file))
        .with_state(state.uploads);

    let chart_routes = Router::new()
        .route("/chart", post(chart))
        .with_state(state.charts);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .merge(upload_routes)
        .merge(chart_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(state.max_body_bytes)),
        )
}
