//! Line chart configuration
//!
//! Static description of the cumulative-confirmed line chart. Serializes to
//! the option layout Chart.js expects, so a web renderer can use it as-is.

use serde::Serialize;

use super::transform::ChartSeries;

/// Accent color shared by the line, hover points and the tooltip text
pub const ACCENT_COLOR: &str = "#D35400";

/// Name of the custom tooltip hook the renderer must install
pub const TOOLTIP_HOOK: &str = "custom";

/// Full chart description: data plus options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartConfig {
    pub data: LineChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub fill: bool,
    pub border_color: String,
    pub data: Vec<Option<u64>>,
    pub point_hover_radius: u32,
    pub point_hover_background_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub title: TitleOptions,
    pub legend: LegendOptions,
    pub hover: HoverOptions,
    pub tooltips: TooltipOptions,
    pub scales: Scales,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
    pub font_size: u32,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendOptions {
    pub display: bool,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoverOptions {
    pub intersect: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipOptions {
    /// Built-in tooltips are off; the custom hook draws instead
    pub enabled: bool,
    pub mode: String,
    pub position: String,
    pub custom: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub x_axes: Vec<Axis>,
    pub y_axes: Vec<Axis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub grid_lines: GridLines,
    pub ticks: Ticks,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridLines {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticks {
    pub auto_skip: bool,
    pub max_ticks_limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Top,
    Bottom,
    Left,
    Right,
}

impl Ticks {
    fn sparse() -> Self {
        Self {
            auto_skip: true,
            max_ticks_limit: 6,
        }
    }
}

impl LineChartConfig {
    /// The cumulative confirmed cases chart, with no data yet
    pub fn cumulative_confirmed() -> Self {
        Self {
            data: LineChartData {
                labels: Vec::new(),
                datasets: vec![Dataset {
                    label: "Total Confirmed".to_string(),
                    fill: false,
                    border_color: ACCENT_COLOR.to_string(),
                    data: Vec::new(),
                    point_hover_radius: 6,
                    point_hover_background_color: ACCENT_COLOR.to_string(),
                }],
            },
            options: ChartOptions {
                title: TitleOptions {
                    display: true,
                    text: "CUMULATIVE CONFIRMED CASES".to_string(),
                    font_size: 12,
                    position: Position::Left,
                },
                legend: LegendOptions {
                    display: false,
                    position: Position::Bottom,
                },
                hover: HoverOptions { intersect: false },
                tooltips: TooltipOptions {
                    enabled: false,
                    mode: "x-axis".to_string(),
                    position: "nearest".to_string(),
                    custom: TOOLTIP_HOOK.to_string(),
                },
                scales: Scales {
                    x_axes: vec![Axis {
                        grid_lines: GridLines { display: false },
                        ticks: Ticks::sparse(),
                        position: None,
                    }],
                    y_axes: vec![Axis {
                        grid_lines: GridLines { display: true },
                        ticks: Ticks::sparse(),
                        position: Some(Position::Right),
                    }],
                },
            },
        }
    }

    /// Copy of this config carrying the given series
    pub fn with_series(&self, series: &ChartSeries) -> Self {
        let mut config = self.clone();
        config.data.labels = series.labels.clone();
        for dataset in &mut config.data.datasets {
            dataset.data = series.values.clone();
        }
        config
    }
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self::cumulative_confirmed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_static_config() {
        let config = LineChartConfig::cumulative_confirmed();
        assert!(config.data.labels.is_empty());
        assert_eq!(config.data.datasets.len(), 1);
        assert_eq!(config.data.datasets[0].label, "Total Confirmed");
        assert!(!config.options.tooltips.enabled);
        assert_eq!(config.options.scales.y_axes[0].position, Some(Position::Right));
    }

    #[test]
    fn test_with_series_leaves_original_untouched() {
        let base = LineChartConfig::cumulative_confirmed();
        let series = ChartSeries {
            labels: vec!["25 April".to_string(), "26 April".to_string()],
            values: vec![Some(24942), Some(26917)],
        };

        let filled = base.with_series(&series);
        assert_eq!(filled.data.labels, series.labels);
        assert_eq!(filled.data.datasets[0].data, series.values);
        assert!(base.data.datasets[0].data.is_empty());
    }

    #[test]
    fn test_serializes_to_chartjs_layout() {
        let value = serde_json::to_value(LineChartConfig::cumulative_confirmed()).unwrap();

        assert_eq!(
            value["data"]["datasets"][0]["borderColor"],
            json!("#D35400")
        );
        assert_eq!(value["data"]["datasets"][0]["pointHoverRadius"], json!(6));
        assert_eq!(value["options"]["title"]["fontSize"], json!(12));
        assert_eq!(value["options"]["title"]["position"], json!("left"));
        assert_eq!(value["options"]["tooltips"]["mode"], json!("x-axis"));
        assert_eq!(
            value["options"]["scales"]["xAxes"][0]["gridLines"]["display"],
            json!(false)
        );
        assert_eq!(
            value["options"]["scales"]["yAxes"][0]["ticks"]["maxTicksLimit"],
            json!(6)
        );
        assert!(value["options"]["scales"]["xAxes"][0].get("position").is_none());
    }
}
