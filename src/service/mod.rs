pub mod chart;
pub mod summary;
pub mod text_extractor;
pub mod upload;

pub use chart::ChartBuilder;
pub use summary::compute_summary;
pub use upload::{UploadService, UploadedFile};
