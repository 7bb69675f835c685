use crate::error::ParseError;
use crate::models::{Cell, ColumnKind, Table};
use once_cell::sync::Lazy;
use regex::Regex;

/// 文本日志行格式: `Date: <D>, Category: <C>, Amount: $<A>`
static LOG_LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Date: (.*?), Category: (.*?), Amount: \$([0-9.]+)").unwrap()
});

pub const DATE_COLUMN: &str = "Date";
pub const CATEGORY_COLUMN: &str = "Category";
pub const AMOUNT_COLUMN: &str = "Amount";

/// 从文本日志中抽取的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedRow {
    pub date: String,
    pub category: String,
    pub amount: f64,
}

/// 解析单行; 不匹配返回 Ok(None), 金额无法转为浮点数时返回错误
pub fn parse_line(line: &str) -> Result<Option<ExtractedRow>, ParseError> {
    let Some(caps) = LOG_LINE_PATTERN.captures(line) else {
        return Ok(None);
    };

    let raw_amount = &caps[3];
    let amount = raw_amount
        .parse::<f64>()
        .map_err(|_| ParseError::Amount(raw_amount.to_string()))?;

    Ok(Some(ExtractedRow {
        date: caps[1].to_string(),
        category: caps[2].to_string(),
        amount,
    }))
}

/// 逐行抽取; 不匹配的行直接丢弃
pub fn extract_rows(text: &str) -> Result<Vec<ExtractedRow>, ParseError> {
    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for line in text.trim().split('\n') {
        match parse_line(line)? {
            Some(row) => rows.push(row),
            None => skipped += 1,
        }
    }

    tracing::debug!("Text log extracted {} rows, skipped {} lines", rows.len(), skipped);
    Ok(rows)
}

/// 文本日志 -> 表格 (Date, Category, Amount), 列类型固定, 不依赖行推断
pub fn extract_table(text: &str) -> Result<Table, ParseError> {
    let rows = extract_rows(text)?
        .into_iter()
        .map(|row| {
            vec![
                Cell::Text(row.date),
                Cell::Text(row.category),
                Cell::Float(row.amount),
            ]
        })
        .collect();

    Table::with_kinds(
        vec![
            (DATE_COLUMN.to_string(), ColumnKind::Text),
            (CATEGORY_COLUMN.to_string(), ColumnKind::Text),
            (AMOUNT_COLUMN.to_string(), ColumnKind::Float),
        ],
        rows,
    )
}
