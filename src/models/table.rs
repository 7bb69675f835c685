use crate::error::ParseError;
use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};

/// 单元格值
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// 数值视图; NaN 与无穷值视为缺失
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) if f.is_finite() => Some(*f),
            _ => None,
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Null => serializer.serialize_none(),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::Int(i) => serializer.serialize_i64(*i),
            Cell::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Cell::Float(_) => serializer.serialize_none(),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

/// 列类型, 由该列全部单元格推断
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Integer,
    Float,
    Boolean,
    Text,
}

impl ColumnKind {
    /// 推断规则: 全为整数 -> Integer; 整数/浮点混合 -> Float;
    /// 全为布尔 -> Boolean; 其余 -> Text.
    /// 有行但全部缺失的列按 Float 处理, 没有任何行的列按 Text 处理.
    pub fn infer<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut has_rows = false;
        let mut has_int = false;
        let mut has_float = false;
        let mut has_bool = false;

        for cell in cells {
            has_rows = true;
            match cell {
                Cell::Null => {}
                Cell::Int(_) => has_int = true,
                Cell::Float(_) => has_float = true,
                Cell::Bool(_) => has_bool = true,
                Cell::Text(_) => return ColumnKind::Text,
            }
        }

        if !has_rows {
            return ColumnKind::Text;
        }

        match (has_int, has_float, has_bool) {
            (_, _, true) if has_int || has_float => ColumnKind::Text,
            (false, false, true) => ColumnKind::Boolean,
            (true, false, false) => ColumnKind::Integer,
            _ => ColumnKind::Float,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// 表格: 有序列 + 等宽行
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// 构建表格, 列类型由单元格推断
    pub fn new(names: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, ParseError> {
        check_shape(&names, &rows)?;

        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| Column {
                kind: ColumnKind::infer(rows.iter().map(|row| &row[idx])),
                name,
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// 按声明的列类型构建表格 (固定结构的数据源, 例如文本日志)
    pub fn with_kinds(
        columns: Vec<(String, ColumnKind)>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self, ParseError> {
        let names: Vec<String> = columns.iter().map(|(name, _)| name.clone()).collect();
        check_shape(&names, &rows)?;

        let columns = columns
            .into_iter()
            .map(|(name, kind)| Column { name, kind })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 某列的全部单元格 (按行顺序)
    pub fn column_cells(&self, idx: usize) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    /// 前 n 行转为 "列名 -> 值" 的有序记录
    pub fn head_records(&self, n: usize) -> Vec<IndexMap<String, Cell>> {
        self.rows
            .iter()
            .take(n)
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(col, cell)| (col.name.clone(), cell.clone()))
                    .collect()
            })
            .collect()
    }
}

/// 校验列名唯一且每行单元格数与列数一致
fn check_shape(names: &[String], rows: &[Vec<Cell>]) -> Result<(), ParseError> {
    let mut seen = IndexSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(ParseError::DuplicateColumn(name.clone()));
        }
    }

    for (idx, row) in rows.iter().enumerate() {
        if row.len() != names.len() {
            return Err(ParseError::RowWidth {
                row: idx,
                expected: names.len(),
                found: row.len(),
            });
        }
    }

    Ok(())
}

/// 规范化原始表头: 空列名改为 `Unnamed: <idx>`, 重复列名追加 `.1`, `.2` ...
pub fn normalize_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut used: IndexSet<String> = IndexSet::new();
    let mut out = Vec::new();

    for (idx, name) in raw.into_iter().enumerate() {
        let name = name.as_ref().trim();
        let base = if name.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while used.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        used.insert(candidate.clone());
        out.push(candidate);
    }

    out
}
