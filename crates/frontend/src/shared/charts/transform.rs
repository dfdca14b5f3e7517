//! Reshape API records into chart datasets.
//!
//! Records are read through their serde representation, so any DTO can be
//! charted by field name. Label order always follows record order.

use serde::Serialize;
use serde_json::{json, Value};

use super::dataset::{
    opaque, palette, ChartDataset, ChartKind, ChartSeries, SeriesColor, SeriesStyle,
};

fn to_values<T: Serialize>(records: &[T]) -> Vec<Value> {
    records
        .iter()
        .map(|record| serde_json::to_value(record).unwrap_or(Value::Null))
        .collect()
}

/// Display label of `record[key]`; missing keys yield an empty label.
fn label_of(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Numeric `record[key]`; decimals sent as strings are accepted.
fn number_of(record: &Value, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn labels(records: &[Value], key: &str) -> Vec<String> {
    records.iter().map(|r| label_of(r, key)).collect()
}

fn numbers(records: &[Value], key: &str) -> Vec<Option<f64>> {
    records.iter().map(|r| number_of(r, key)).collect()
}

pub fn to_bar_series<T: Serialize>(
    records: &[T],
    label_key: &str,
    value_key: &str,
    style: &SeriesStyle,
) -> ChartDataset {
    let records = to_values(records);
    ChartDataset {
        labels: labels(&records, label_key),
        series: vec![ChartSeries {
            name: Some(style.label.clone().unwrap_or_else(|| value_key.to_string())),
            values: numbers(&records, value_key),
            color: SeriesColor::Single(
                style.color.clone().unwrap_or_else(|| palette::BAR_FILL.to_string()),
            ),
            border_color: SeriesColor::Single(
                style
                    .border_color
                    .clone()
                    .unwrap_or_else(|| palette::BAR_BORDER.to_string()),
            ),
            border_width: Some(1),
            tension: None,
            fill: None,
        }],
    }
}

pub fn to_line_series<T: Serialize>(
    records: &[T],
    label_key: &str,
    value_key: &str,
    style: &SeriesStyle,
) -> ChartDataset {
    let records = to_values(records);
    ChartDataset {
        labels: labels(&records, label_key),
        series: vec![ChartSeries {
            name: Some(style.label.clone().unwrap_or_else(|| value_key.to_string())),
            values: numbers(&records, value_key),
            color: SeriesColor::Single(
                style.color.clone().unwrap_or_else(|| palette::LINE_FILL.to_string()),
            ),
            border_color: SeriesColor::Single(
                style
                    .border_color
                    .clone()
                    .unwrap_or_else(|| palette::LINE_BORDER.to_string()),
            ),
            border_width: None,
            tension: Some(style.tension.unwrap_or(0.1)),
            fill: Some(true),
        }],
    }
}

/// One slice per record, coloured from a repeating six-colour palette.
pub fn to_pie_series<T: Serialize>(records: &[T], label_key: &str, value_key: &str) -> ChartDataset {
    let records = to_values(records);
    let colors: Vec<String> = (0..records.len())
        .map(|i| palette::PIE[i % palette::PIE.len()].to_string())
        .collect();
    let borders: Vec<String> = colors.iter().map(|c| opaque(c)).collect();

    ChartDataset {
        labels: labels(&records, label_key),
        series: vec![ChartSeries {
            name: None,
            values: numbers(&records, value_key),
            color: SeriesColor::PerPoint(colors),
            border_color: SeriesColor::PerPoint(borders),
            border_width: Some(1),
            tension: None,
            fill: None,
        }],
    }
}

/// One series per entry of `value_keys`, sharing the labels.
pub fn to_multi_series<T: Serialize>(
    records: &[T],
    label_key: &str,
    value_keys: &[&str],
    kind: ChartKind,
) -> ChartDataset {
    let records = to_values(records);
    let series = value_keys
        .iter()
        .enumerate()
        .map(|(index, key)| {
            let color = palette::MULTI[index % palette::MULTI.len()];
            ChartSeries {
                name: Some(key.to_string()),
                values: numbers(&records, key),
                color: SeriesColor::Single(color.to_string()),
                border_color: SeriesColor::Single(opaque(color)),
                border_width: Some(if kind == ChartKind::Line { 2 } else { 1 }),
                tension: (kind == ChartKind::Line).then_some(0.1),
                fill: None,
            }
        })
        .collect();

    ChartDataset {
        labels: labels(&records, label_key),
        series,
    }
}

impl ChartDataset {
    /// Rename series in order, e.g. API field names to display names.
    pub fn with_series_names(mut self, names: &[&str]) -> Self {
        for (series, name) in self.series.iter_mut().zip(names) {
            series.name = Some(name.to_string());
        }
        self
    }
}

/// Full `new Chart(canvas, config)` argument.
pub fn chartjs_config(kind: ChartKind, data: &ChartDataset, horizontal: bool) -> Value {
    let legend = match kind {
        ChartKind::Pie | ChartKind::Doughnut => "right",
        ChartKind::Bar | ChartKind::Line => "top",
    };
    let mut options = json!({
        "responsive": true,
        "maintainAspectRatio": false,
        "plugins": { "legend": { "position": legend } }
    });
    if horizontal {
        options["indexAxis"] = json!("y");
    }
    if matches!(kind, ChartKind::Bar | ChartKind::Line) {
        options["scales"] = json!({ "y": { "beginAtZero": true } });
    }

    json!({
        "type": kind.as_str(),
        "data": data,
        "options": options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Count {
        department: &'static str,
        count: i64,
    }

    fn counts() -> Vec<Count> {
        vec![
            Count {
                department: "CS",
                count: 10,
            },
            Count {
                department: "EE",
                count: 5,
            },
        ]
    }

    #[test]
    fn test_bar_series_defaults() {
        let data = to_bar_series(&counts(), "department", "count", &SeriesStyle::default());
        assert_eq!(data.labels, vec!["CS", "EE"]);
        assert_eq!(data.series.len(), 1);
        let series = &data.series[0];
        assert_eq!(series.values, vec![Some(10.0), Some(5.0)]);
        assert_eq!(series.name.as_deref(), Some("count"));
        assert_eq!(series.border_width, Some(1));

        let wire = serde_json::to_value(&data).unwrap();
        assert_eq!(wire["labels"], json!(["CS", "EE"]));
        assert_eq!(wire["datasets"][0]["data"], json!([10.0, 5.0]));
        assert_eq!(wire["datasets"][0]["backgroundColor"], json!(palette::BAR_FILL));
        assert_eq!(wire["datasets"][0]["borderColor"], json!(palette::BAR_BORDER));
    }

    #[test]
    fn test_missing_keys_pass_through_as_absent() {
        let records = vec![
            json!({"year": 2023, "value": "12.5"}),
            json!({"value": 3}),
            json!({"year": 2025}),
        ];
        let data = to_line_series(&records, "year", "value", &SeriesStyle::labelled("Value"));
        assert_eq!(data.labels, vec!["2023", "", "2025"]);
        assert_eq!(data.series[0].values, vec![Some(12.5), Some(3.0), None]);
        assert_eq!(data.series[0].name.as_deref(), Some("Value"));
        assert_eq!(data.series[0].tension, Some(0.1));
        assert_eq!(data.series[0].fill, Some(true));

        let wire = serde_json::to_value(&data).unwrap();
        assert_eq!(wire["datasets"][0]["data"][2], Value::Null);
    }

    #[test]
    fn test_label_order_is_input_order() {
        let records = vec![json!({"k": "z", "v": 1}), json!({"k": "a", "v": 2})];
        let data = to_bar_series(&records, "k", "v", &SeriesStyle::default());
        assert_eq!(data.labels, vec!["z", "a"]);
    }

    #[test]
    fn test_pie_colors_cycle_with_opaque_borders() {
        let records: Vec<Value> = (0..7).map(|i| json!({"k": i, "v": i})).collect();
        let data = to_pie_series(&records, "k", "v");
        let series = &data.series[0];
        assert_eq!(series.name, None);
        match (&series.color, &series.border_color) {
            (SeriesColor::PerPoint(fill), SeriesColor::PerPoint(border)) => {
                assert_eq!(fill.len(), 7);
                assert_eq!(fill[6], palette::PIE[0]);
                assert_eq!(border[0], "rgba(255, 99, 132, 1)");
            }
            other => panic!("expected per-point colors, got {:?}", other),
        }
    }

    #[test]
    fn test_multi_series_per_kind() {
        let records = vec![json!({"year": 2024, "admission_count": 100, "graduation_count": 80})];
        let keys = ["admission_count", "graduation_count"];

        let bars = to_multi_series(&records, "year", &keys, ChartKind::Bar);
        assert_eq!(bars.series.len(), 2);
        assert_eq!(bars.series[1].name.as_deref(), Some("graduation_count"));
        assert_eq!(bars.series[1].values, vec![Some(80.0)]);
        assert_eq!(bars.series[0].border_width, Some(1));
        assert_eq!(bars.series[0].tension, None);

        let lines = to_multi_series(&records, "year", &keys, ChartKind::Line)
            .with_series_names(&["Admissions", "Graduations"]);
        assert_eq!(lines.series[0].border_width, Some(2));
        assert_eq!(lines.series[0].tension, Some(0.1));
        assert_eq!(lines.series[1].name.as_deref(), Some("Graduations"));
    }

    #[test]
    fn test_chartjs_config_shape() {
        let data = to_bar_series(&counts(), "department", "count", &SeriesStyle::default());
        let config = chartjs_config(ChartKind::Bar, &data, true);
        assert_eq!(config["type"], "bar");
        assert_eq!(config["options"]["indexAxis"], "y");
        assert_eq!(config["data"]["labels"][1], "EE");
    }
}
