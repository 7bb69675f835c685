use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 文件内容解析失败的具体原因, 消息原样返回给客户端
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Xlsx(#[from] calamine::XlsxError),

    #[error("'utf-8' codec can't decode upload: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("could not convert string to float: '{0}'")]
    Amount(String),

    #[error("No columns to parse from file")]
    NoColumns,

    #[error("Worksheet not found in workbook")]
    NoWorksheet,

    #[error("Expected {expected} fields in line {line}, saw {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Row {row} has {found} cells but the table declares {expected} columns")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Failed to read upload: {0}")]
    Io(#[from] std::io::Error),
}

/// 图表请求错误
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Value of '{axis}' is not the name of a column in 'data': '{name}'")]
    UnknownColumn { axis: &'static str, name: String },
}

/// 接口层统一错误, 每个变体对应一个明确的状态码
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Invalid filename: {0:?}")]
    InvalidFilename(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read multipart request: {0}")]
    Multipart(#[from] MultipartError),

    #[error("{0}")]
    InvalidChart(#[from] ChartError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Failed to store upload: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Parse task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFile
            | AppError::InvalidFilename(_)
            | AppError::UnsupportedFormat(_)
            | AppError::InvalidChart(_) => StatusCode::BAD_REQUEST,
            // 超出请求体上限时为 413, 其余多为 400
            AppError::Multipart(err) => err.status(),
            AppError::Parse(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage(_) | AppError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 稳定的错误标识, 供前端区分失败类型
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingFile => "missing_file",
            AppError::InvalidFilename(_) => "invalid_filename",
            AppError::UnsupportedFormat(_) => "unsupported_format",
            AppError::Multipart(err) if err.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                "payload_too_large"
            }
            AppError::Multipart(_) => "malformed_request",
            AppError::InvalidChart(_) => "invalid_chart",
            AppError::Parse(_) => "parse_failure",
            AppError::Storage(_) => "storage_failure",
            AppError::Task(_) => "internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed ({}): {}", status, self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status, self);
        }

        let body = json!({
            "error": self.to_string(),
            "code": self.code(),
        });
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
