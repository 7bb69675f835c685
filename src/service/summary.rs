use crate::models::{Cell, SummaryEntry, Table};
use indexmap::IndexMap;

/// 按跳过缺失值的语义汇总一组单元格
pub fn summarize_cells<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> SummaryEntry {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut min = f64::INFINITY;

    for value in cells.into_iter().filter_map(Cell::as_f64) {
        count += 1;
        sum += value;
        max = max.max(value);
        min = min.min(value);
    }

    if count == 0 {
        return SummaryEntry::EMPTY;
    }

    // 浮点累加误差可能让均值略微越界
    let mean = (sum / count as f64).clamp(min, max);
    SummaryEntry {
        mean: Some(mean),
        max: Some(max),
        min: Some(min),
    }
}

/// 计算每个数值列的 mean/max/min, 非数值列不出现在结果中
pub fn compute_summary(table: &Table) -> IndexMap<String, SummaryEntry> {
    table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, col)| col.kind.is_numeric())
        .map(|(idx, col)| (col.name.clone(), summarize_cells(table.column_cells(idx))))
        .collect()
}
