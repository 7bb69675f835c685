use crate::error::ParseError;
use crate::models::{normalize_headers, Cell, Table};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;

/// Excel 单元格 -> Cell. 错误单元格 (#DIV/0! 等) 视为缺失
pub fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Null,
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::String(s) if s.is_empty() => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => Cell::Text(value.format("%Y-%m-%dT%H:%M:%S").to_string()),
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

fn header_text(data: &Data) -> String {
    match data {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 工作表区域 -> 表格: 首行为表头, 其余为数据行
pub fn table_from_range(range: &Range<Data>) -> Result<Table, ParseError> {
    let mut rows_iter = range.rows();
    let Some(header_row) = rows_iter.next() else {
        return Err(ParseError::NoColumns);
    };

    // 表头尾部的空单元格不算列
    let width = header_row
        .iter()
        .rposition(|cell| !matches!(cell, Data::Empty))
        .map(|idx| idx + 1)
        .ok_or(ParseError::NoColumns)?;
    let names = normalize_headers(header_row[..width].iter().map(header_text));

    // 区域起始行 (0 基) + 表头行, 换算成 1 基行号
    let first_data_line = range.start().map(|(row, _)| row as u64 + 2).unwrap_or(2);

    let mut rows = Vec::new();
    for (offset, row) in rows_iter.enumerate() {
        let used = row
            .iter()
            .rposition(|cell| !matches!(cell, Data::Empty))
            .map(|idx| idx + 1)
            .unwrap_or(0);
        if used > width {
            return Err(ParseError::RaggedRow {
                line: first_data_line + offset as u64,
                expected: width,
                found: used,
            });
        }

        let mut cells: Vec<Cell> = row.iter().take(width).map(convert_cell).collect();
        cells.resize(width, Cell::Null);
        rows.push(cells);
    }

    tracing::debug!("Worksheet parsed: {} columns, {} rows", width, rows.len());
    Table::new(names, rows)
}

/// 读取工作簿的第一个工作表
pub fn read_xlsx_path(path: &Path) -> Result<Table, ParseError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ParseError::NoWorksheet)??;
    table_from_range(&range)
}
