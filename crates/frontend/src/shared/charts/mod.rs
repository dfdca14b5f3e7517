pub mod chart_canvas;
pub mod chart_panel;
pub mod dataset;
pub mod transform;

pub use chart_canvas::ChartCanvas;
pub use chart_panel::ChartPanel;
pub use dataset::{ChartDataset, ChartKind, ChartSeries, SeriesColor, SeriesStyle};
pub use transform::{to_bar_series, to_line_series, to_multi_series, to_pie_series};
