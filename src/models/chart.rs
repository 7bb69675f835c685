use serde::Serialize;
use serde_json::Value;

/// plotly.express 默认配色的第一个颜色
pub const DEFAULT_BAR_COLOR: &str = "#636efa";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
        }
    }
}

/// 图表描述: 坐标列 + 标题 + 可直接交给前端绘制的 figure
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub x: String,
    pub y: String,
    pub kind: ChartKind,
    pub title: String,
    pub figure: Figure,
}

/// figure = traces + layout
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<BarTrace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, Serialize)]
pub struct BarTrace {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub x: Vec<Value>,
    pub y: Vec<Value>,
    pub orientation: String,
    pub xaxis: String,
    pub yaxis: String,
    pub marker: Marker,
    pub showlegend: bool,
    pub textposition: String,
    pub hovertemplate: String,
    pub alignmentgroup: String,
    pub offsetgroup: String,
    pub legendgroup: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub anchor: String,
    pub domain: [f64; 2],
    pub title: Title,
}

#[derive(Debug, Clone, Serialize)]
pub struct Legend {
    pub tracegroupgap: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub legend: Legend,
    pub barmode: String,
}
