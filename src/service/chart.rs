use crate::error::ChartError;
use crate::models::chart::{Axis, Legend, Marker, Title, DEFAULT_BAR_COLOR};
use crate::models::{BarTrace, ChartKind, ChartSpec, Figure, Layout};
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// 一条记录: 列名 -> JSON 值
pub type Record = IndexMap<String, Value>;

/// 柱状图构建器
#[derive(Debug, Clone)]
pub struct ChartBuilder {
    title: String,
}

impl ChartBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// 按原始行顺序构建柱状图, 不做过滤/排序.
    /// 数据列为所有记录键的并集, x/y 不在其中时返回错误; 某行缺少该键时取 null.
    pub fn build_bar(&self, data: &[Record], x: &str, y: &str) -> Result<ChartSpec, ChartError> {
        let columns: IndexSet<&str> = data
            .iter()
            .flat_map(|record| record.keys().map(String::as_str))
            .collect();

        for (axis, name) in [("x", x), ("y", y)] {
            if !columns.contains(name) {
                return Err(ChartError::UnknownColumn {
                    axis,
                    name: name.to_string(),
                });
            }
        }

        let pick = |key: &str| -> Vec<Value> {
            data.iter()
                .map(|record| record.get(key).cloned().unwrap_or(Value::Null))
                .collect()
        };

        let trace = BarTrace {
            kind: ChartKind::Bar.as_str().to_string(),
            name: String::new(),
            x: pick(x),
            y: pick(y),
            orientation: "v".to_string(),
            xaxis: "x".to_string(),
            yaxis: "y".to_string(),
            marker: Marker {
                color: DEFAULT_BAR_COLOR.to_string(),
            },
            showlegend: false,
            textposition: "auto".to_string(),
            hovertemplate: format!("{}=%{{x}}<br>{}=%{{y}}<extra></extra>", x, y),
            alignmentgroup: "True".to_string(),
            offsetgroup: String::new(),
            legendgroup: String::new(),
        };

        let layout = Layout {
            title: Title {
                text: self.title.clone(),
            },
            xaxis: axis("y", x),
            yaxis: axis("x", y),
            legend: Legend { tracegroupgap: 0 },
            barmode: "relative".to_string(),
        };

        tracing::debug!("Built bar chart x={} y={} with {} points", x, y, trace.x.len());

        Ok(ChartSpec {
            x: x.to_string(),
            y: y.to_string(),
            kind: ChartKind::Bar,
            title: self.title.clone(),
            figure: Figure {
                data: vec![trace],
                layout,
            },
        })
    }
}

fn axis(anchor: &str, title: &str) -> Axis {
    Axis {
        anchor: anchor.to_string(),
        domain: [0.0, 1.0],
        title: Title {
            text: title.to_string(),
        },
    }
}
