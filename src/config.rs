use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 环境变量前缀, 例如 `TABLE_INSIGHT_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "TABLE_INSIGHT";

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 上传相关配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// 上传文件保存目录, 启动时自动创建
    pub dir: PathBuf,
    /// 响应中返回的预览行数
    pub preview_rows: usize,
    /// 请求体大小上限 (字节)
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            upload: UploadConfig {
                dir: PathBuf::from("uploads"),
                preview_rows: 50,
                max_body_bytes: 16 * 1024 * 1024,
            },
            chart: ChartConfig {
                title: "AI Chart".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// 加载配置: 内置默认值 -> 可选的 config.toml -> 环境变量
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__");
        Self::load_from(env)
    }

    fn load_from(env: config::Environment) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("upload.dir", defaults.upload.dir.to_string_lossy().into_owned())?
            .set_default("upload.preview_rows", defaults.upload.preview_rows as i64)?
            .set_default("upload.max_body_bytes", defaults.upload.max_body_bytes as i64)?
            .set_default("chart.title", defaults.chart.title)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
