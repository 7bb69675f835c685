use super::{Cell, SummaryEntry};
use indexmap::IndexMap;
use serde::Serialize;

/// 上传解析结果
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub columns: Vec<String>,
    pub data: Vec<IndexMap<String, Cell>>,
    pub summary: IndexMap<String, SummaryEntry>,
}
