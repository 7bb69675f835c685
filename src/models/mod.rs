pub mod chart;
pub mod summary;
pub mod table;
pub mod upload;

pub use chart::{BarTrace, ChartKind, ChartSpec, Figure, Layout};
pub use summary::SummaryEntry;
pub use table::{normalize_headers, Cell, Column, ColumnKind, Table};
pub use upload::UploadResponse;
