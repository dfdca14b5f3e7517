use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Doughnut,
}

impl ChartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
        }
    }
}

/// One colour for the whole series, or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesColor {
    Single(String),
    PerPoint(Vec<String>),
}

/// One dataset, serialised in the shape Chart.js expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    #[serde(rename = "label", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Absent source values stay `None` and render as gaps
    #[serde(rename = "data")]
    pub values: Vec<Option<f64>>,
    #[serde(rename = "backgroundColor")]
    pub color: SeriesColor,
    pub border_color: SeriesColor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartDataset {
    pub labels: Vec<String>,
    #[serde(rename = "datasets")]
    pub series: Vec<ChartSeries>,
}

impl ChartDataset {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Overrides for single-series bar and line charts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesStyle {
    pub label: Option<String>,
    pub color: Option<String>,
    pub border_color: Option<String>,
    pub tension: Option<f64>,
}

impl SeriesStyle {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.border_color = Some(opaque(&color));
        self.color = Some(color);
        self
    }
}

pub mod palette {
    pub const BAR_FILL: &str = "rgba(75, 192, 192, 0.6)";
    pub const BAR_BORDER: &str = "rgba(75, 192, 192, 1)";
    pub const LINE_BORDER: &str = "rgb(75, 192, 192)";
    pub const LINE_FILL: &str = "rgba(75, 192, 192, 0.2)";
    pub const TARGET: &str = "rgba(255, 99, 132, 0.6)";

    pub const PIE: [&str; 6] = [
        "rgba(255, 99, 132, 0.6)",
        "rgba(54, 162, 235, 0.6)",
        "rgba(255, 206, 86, 0.6)",
        "rgba(75, 192, 192, 0.6)",
        "rgba(153, 102, 255, 0.6)",
        "rgba(255, 159, 64, 0.6)",
    ];

    pub const MULTI: [&str; 5] = [
        "rgba(75, 192, 192, 0.6)",
        "rgba(255, 99, 132, 0.6)",
        "rgba(255, 206, 86, 0.6)",
        "rgba(153, 102, 255, 0.6)",
        "rgba(54, 162, 235, 0.6)",
    ];
}

/// Border variant of a translucent fill colour.
pub fn opaque(color: &str) -> String {
    color.replacen("0.6", "1", 1)
}
