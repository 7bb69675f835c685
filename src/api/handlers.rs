use crate::error::AppError;
use crate::models::{Figure, UploadResponse};
use crate::service::chart::Record;
use crate::service::{ChartBuilder, UploadService, UploadedFile};
use axum::{
    extract::{multipart::MultipartRejection, Json, Multipart, State},
    response::Html,
};
use serde::Deserialize;
use std::sync::Arc;

/// 上传表单中文件字段名
pub const FILE_FIELD: &str = "file";

/// 请求体: 行数据 + 坐标列
#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    pub data: Vec<Record>,
    pub x: String,
    pub y: String,
}

/// 首页
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 上传并解析文件
pub async fn upload_file(
    State(service): State<Arc<UploadService>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    // 非 multipart 请求按 "未上传文件" 处理
    let upload = match multipart {
        Ok(mut multipart) => read_file_field(&mut multipart).await?,
        Err(rejection) => {
            tracing::debug!("Upload without multipart body: {}", rejection);
            None
        }
    };

    let response = service.process(upload).await?;
    Ok(Json(response))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        tracing::info!("Received upload {:?} ({} bytes)", filename, bytes.len());
        return Ok(Some(UploadedFile {
            filename,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

/// 根据行数据生成柱状图
pub async fn chart(
    State(builder): State<Arc<ChartBuilder>>,
    Json(req): Json<ChartRequest>,
) -> Result<Json<Figure>, AppError> {
    let spec = builder.build_bar(&req.data, &req.x, &req.y)?;
    tracing::info!(
        "Chart {} built: x={}, y={}, {} rows",
        spec.kind.as_str(),
        spec.x,
        spec.y,
        req.data.len()
    );
    Ok(Json(spec.figure))
}
