pub mod csv_reader;
pub mod storage;
pub mod xlsx_reader;

pub use storage::{sanitize_filename, UploadStore};

use crate::error::ParseError;
use crate::models::Table;
use crate::service::text_extractor;
use std::path::Path;

/// 支持的上传格式, 按文件名后缀识别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Xlsx,
    Text,
}

impl FileFormat {
    /// 后缀区分大小写
    pub fn from_filename(name: &str) -> Option<Self> {
        if name.ends_with(".csv") {
            Some(FileFormat::Csv)
        } else if name.ends_with(".xlsx") {
            Some(FileFormat::Xlsx)
        } else if name.ends_with(".txt") {
            Some(FileFormat::Text)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
            FileFormat::Text => "txt",
        }
    }
}

/// 读取已保存的上传文件并解析为表格 (阻塞 IO)
pub fn load_table(path: &Path, format: FileFormat) -> Result<Table, ParseError> {
    match format {
        FileFormat::Csv => csv_reader::read_csv_path(path),
        FileFormat::Xlsx => xlsx_reader::read_xlsx_path(path),
        FileFormat::Text => {
            let bytes = std::fs::read(path)?;
            let text = String::from_utf8(bytes)?;
            text_extractor::extract_table(&text)
        }
    }
}
