use crate::error::ParseError;
use crate::models::{normalize_headers, Cell, Table};
use std::io::Read;
use std::path::Path;

/// 视为缺失值的字符串
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na(raw: &str) -> bool {
    NA_VALUES.contains(&raw.trim())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "True" | "true" | "TRUE" => Some(true),
        "False" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}

/// 按整列推断类型: 全部可解析为整数 / 浮点 / 布尔时转换, 否则保留原始字符串.
/// inf / -inf 按缺失值处理
pub fn type_column(raw: Vec<String>) -> Vec<Cell> {
    let present = || raw.iter().filter(|v| !is_na(v));

    if present().all(|v| v.trim().parse::<i64>().is_ok()) {
        return raw
            .iter()
            .map(|v| match v.trim().parse::<i64>() {
                Ok(i) if !is_na(v) => Cell::Int(i),
                _ => Cell::Null,
            })
            .collect();
    }

    if present().all(|v| v.trim().parse::<f64>().is_ok()) {
        return raw
            .iter()
            .map(|v| match v.trim().parse::<f64>() {
                Ok(f) if !is_na(v) && f.is_finite() => Cell::Float(f),
                _ => Cell::Null,
            })
            .collect();
    }

    if present().all(|v| parse_bool(v).is_some()) {
        return raw
            .iter()
            .map(|v| parse_bool(v).map(Cell::Bool).unwrap_or(Cell::Null))
            .collect();
    }

    raw.into_iter()
        .map(|v| if is_na(&v) { Cell::Null } else { Cell::Text(v) })
        .collect()
}

/// 解析 CSV: 首行为表头, 短行补缺失值, 长行报错
pub fn read_csv<R: Read>(reader: R) -> Result<Table, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ParseError::NoColumns);
    }
    let names = normalize_headers(headers.iter());
    let width = names.len();

    let mut raw_columns: Vec<Vec<String>> = vec![Vec::new(); width];
    for result in reader.records() {
        let record = result?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(ParseError::RaggedRow {
                line,
                expected: width,
                found: record.len(),
            });
        }
        for (idx, column) in raw_columns.iter_mut().enumerate() {
            column.push(record.get(idx).unwrap_or("").to_string());
        }
    }

    let row_count = raw_columns.first().map(Vec::len).unwrap_or(0);
    let typed: Vec<Vec<Cell>> = raw_columns.into_iter().map(type_column).collect();

    let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(row_count);
    for row_idx in 0..row_count {
        rows.push(typed.iter().map(|col| col[row_idx].clone()).collect());
    }

    tracing::debug!("CSV parsed: {} columns, {} rows", width, row_count);
    Table::new(names, rows)
}

pub fn read_csv_path(path: &Path) -> Result<Table, ParseError> {
    let file = std::fs::File::open(path)?;
    read_csv(std::io::BufReader::new(file))
}
