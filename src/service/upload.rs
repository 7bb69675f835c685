use crate::error::{AppError, Result};
use crate::ingest::{self, sanitize_filename, FileFormat, UploadStore};
use crate::models::UploadResponse;
use crate::service::summary::compute_summary;
use std::time::Instant;

/// 客户端上传的单个文件
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// 上传处理服务: 选择解析器 -> 保存 -> 解析 -> 汇总
pub struct UploadService {
    store: UploadStore,
    preview_rows: usize,
}

impl UploadService {
    pub fn new(store: UploadStore, preview_rows: usize) -> Self {
        Self {
            store,
            preview_rows,
        }
    }

    pub fn store(&self) -> &UploadStore {
        &self.store
    }

    pub async fn process(&self, upload: Option<UploadedFile>) -> Result<UploadResponse> {
        let upload = match upload {
            Some(file) if !file.filename.is_empty() => file,
            _ => return Err(AppError::MissingFile),
        };

        let filename = sanitize_filename(&upload.filename);
        if filename.is_empty() {
            return Err(AppError::InvalidFilename(upload.filename));
        }

        // 不支持的格式不落盘
        let format = FileFormat::from_filename(&filename)
            .ok_or_else(|| AppError::UnsupportedFormat(filename.clone()))?;

        let start = Instant::now();
        let path = self.store.save(&filename, &upload.bytes).await?;

        let table = tokio::task::spawn_blocking(move || ingest::load_table(&path, format)).await??;
        let summary = compute_summary(&table);

        tracing::info!(
            "Parsed {} as {}: {} columns, {} rows, {} numeric, 耗时: {:?}",
            filename,
            format.as_str(),
            table.columns().len(),
            table.len(),
            summary.len(),
            start.elapsed()
        );

        Ok(UploadResponse {
            columns: table.column_names(),
            data: table.head_records(self.preview_rows),
            summary,
        })
    }
}
