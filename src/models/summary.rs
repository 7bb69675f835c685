use serde::Serialize;

/// 数值列汇总; 没有任何有效值时三项均为 null
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub mean: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

impl SummaryEntry {
    pub const EMPTY: SummaryEntry = SummaryEntry {
        mean: None,
        max: None,
        min: None,
    };
}
