//! Custom chart tooltip
//!
//! Maps the chart engine's hover payload to a description of the tooltip
//! box: caret class, table content and inline style. Whatever UI layer hosts
//! the chart applies the description; nothing here touches a document.

use serde::{Deserialize, Serialize};

use super::chart::ACCENT_COLOR;

/// Element id the host should give the tooltip box
pub const TOOLTIP_ELEMENT_ID: &str = "chartjs-tooltip";

/// Hover payload as sent by the chart engine
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TooltipModel {
    #[serde(default)]
    pub title: Vec<String>,
    /// Absent when the pointer is not over any point
    #[serde(default)]
    pub body: Option<Vec<BodyItem>>,
    #[serde(default)]
    pub label_colors: Vec<LabelColor>,
    #[serde(default)]
    pub y_align: Option<String>,
    #[serde(default)]
    pub x_padding: f64,
    #[serde(default)]
    pub y_padding: f64,
    #[serde(default, rename = "_bodyFontFamily")]
    pub body_font_family: String,
    #[serde(default, rename = "_bodyFontStyle")]
    pub body_font_style: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct BodyItem {
    #[serde(default)]
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LabelColor {
    pub background_color: String,
    pub border_color: String,
}

/// Position of the chart canvas inside its container, in pixels
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub struct CanvasOffset {
    pub left: f64,
    pub top: f64,
}

/// Everything needed to draw the tooltip box
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TooltipRender {
    pub element_id: &'static str,
    pub caret: Caret,
    /// `None` leaves the previous content in place
    pub content: Option<TooltipContent>,
    pub style: TooltipStyle,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Caret {
    Above,
    Below,
    Center,
    NoTransform,
}

impl Caret {
    pub fn class_name(self) -> &'static str {
        match self {
            Caret::Above => "above",
            Caret::Below => "below",
            Caret::Center => "center",
            Caret::NoTransform => "no-transform",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TooltipContent {
    pub titles: Vec<String>,
    pub rows: Vec<TooltipRow>,
}

/// One data series line with its colored key
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TooltipRow {
    pub key_background: String,
    pub key_border: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TooltipStyle {
    pub opacity: f64,
    pub left_px: f64,
    pub top_px: f64,
    pub margin_left_px: f64,
    pub color: String,
    pub font_family: String,
    pub font_size_px: f64,
    pub font_style: String,
    pub padding: String,
}

/// Build the tooltip description for one hover event
pub fn render_tooltip(model: &TooltipModel, canvas: CanvasOffset) -> TooltipRender {
    let caret = match model.y_align.as_deref() {
        Some("above") => Caret::Above,
        Some("below") => Caret::Below,
        Some("center") => Caret::Center,
        _ => Caret::NoTransform,
    };

    let content = model.body.as_ref().map(|body| TooltipContent {
        titles: model.title.clone(),
        rows: body
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let (background, border) = match model.label_colors.get(i) {
                    Some(c) => (c.background_color.clone(), c.border_color.clone()),
                    None => (ACCENT_COLOR.to_string(), ACCENT_COLOR.to_string()),
                };
                TooltipRow {
                    key_background: background,
                    key_border: border,
                    lines: item.lines.clone(),
                }
            })
            .collect(),
    });

    let style = TooltipStyle {
        opacity: if model.opacity == 0.0 { 0.0 } else { 1.0 },
        left_px: canvas.left + 6.0,
        top_px: canvas.top + 6.0,
        margin_left_px: 37.0,
        color: ACCENT_COLOR.to_string(),
        font_family: model.body_font_family.clone(),
        font_size_px: 15.0,
        font_style: model.body_font_style.clone(),
        padding: format!("{}px {}px", model.y_padding, model.x_padding),
    };

    TooltipRender {
        element_id: TOOLTIP_ELEMENT_ID,
        caret,
        content,
        style,
    }
}

impl TooltipRender {
    /// Classes for the tooltip box
    pub fn class_list(&self) -> String {
        format!("create-box {}", self.caret.class_name())
    }

    /// Inline `style` attribute for the tooltip box
    pub fn style_attr(&self) -> String {
        let s = &self.style;
        format!(
            "opacity: {}; left: {}px; top: {}px; position: absolute; margin-left: {}px; \
             color: {}; font-family: {}; font-size: {}px; font-style: {}; padding: {}",
            s.opacity,
            s.left_px,
            s.top_px,
            s.margin_left_px,
            s.color,
            s.font_family,
            s.font_size_px,
            s.font_style,
            s.padding
        )
    }

    /// Table markup for the content, if any
    pub fn to_html(&self) -> Option<String> {
        let content = self.content.as_ref()?;

        let mut html = String::from("<table><thead>");
        for title in &content.titles {
            html.push_str(&format!("<tr><th>{}</th></tr>", escape_html(title)));
        }
        html.push_str("</thead><tbody>");
        for row in &content.rows {
            let style = format!(
                "background:{}; border-color:{}; border-width: 2px",
                escape_html(&row.key_background),
                escape_html(&row.key_border)
            );
            let text = row
                .lines
                .iter()
                .map(|l| escape_html(l))
                .collect::<Vec<_>>()
                .join("<br>");
            html.push_str(&format!(
                "<tr><td><span class=\"chartjs-tooltip-key\" style=\"{}\"></span>{}</td></tr>",
                style, text
            ));
        }
        html.push_str("</tbody></table>");

        Some(html)
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hover_model() -> TooltipModel {
        TooltipModel {
            title: vec!["26 April".to_string()],
            body: Some(vec![BodyItem {
                lines: vec!["Total Confirmed: 26917".to_string()],
            }]),
            label_colors: vec![LabelColor {
                background_color: "#fff".to_string(),
                border_color: "#D35400".to_string(),
            }],
            y_align: Some("below".to_string()),
            x_padding: 6.0,
            y_padding: 4.0,
            body_font_family: "Helvetica".to_string(),
            body_font_style: "normal".to_string(),
            opacity: 1.0,
        }
    }

    #[test]
    fn test_render_with_body() {
        let render = render_tooltip(&hover_model(), CanvasOffset { left: 10.0, top: 20.0 });

        assert_eq!(render.caret, Caret::Below);
        let content = render.content.as_ref().unwrap();
        assert_eq!(content.titles, vec!["26 April"]);
        assert_eq!(content.rows.len(), 1);
        assert_eq!(content.rows[0].key_background, "#fff");
        assert_eq!(content.rows[0].key_border, "#D35400");

        assert_eq!(render.style.left_px, 16.0);
        assert_eq!(render.style.top_px, 26.0);
        assert_eq!(render.style.padding, "4px 6px");
        assert_eq!(render.style.font_size_px, 15.0);
        assert_eq!(render.class_list(), "create-box below");
    }

    #[test]
    fn test_render_without_body() {
        let model = TooltipModel {
            body: None,
            y_align: None,
            ..hover_model()
        };
        let render = render_tooltip(&model, CanvasOffset::default());

        assert!(render.content.is_none());
        assert!(render.to_html().is_none());
        assert_eq!(render.caret, Caret::NoTransform);
        assert_eq!(render.class_list(), "create-box no-transform");
    }

    #[test]
    fn test_missing_label_color_uses_accent() {
        let model = TooltipModel {
            label_colors: Vec::new(),
            ..hover_model()
        };
        let render = render_tooltip(&model, CanvasOffset::default());
        let content = render.content.unwrap();
        assert_eq!(content.rows[0].key_background, ACCENT_COLOR);
    }

    #[test]
    fn test_hidden_when_opacity_zero() {
        let model = TooltipModel {
            opacity: 0.0,
            ..hover_model()
        };
        assert_eq!(render_tooltip(&model, CanvasOffset::default()).style.opacity, 0.0);
    }

    #[test]
    fn test_html_markup_is_escaped() {
        let model = TooltipModel {
            title: vec!["<b>x</b>".to_string()],
            ..hover_model()
        };
        let html = render_tooltip(&model, CanvasOffset::default()).to_html().unwrap();

        assert!(html.starts_with("<table><thead><tr><th>&lt;b&gt;x&lt;/b&gt;</th></tr></thead>"));
        assert!(html.contains(
            "<span class=\"chartjs-tooltip-key\" style=\"background:#fff; border-color:#D35400; border-width: 2px\"></span>Total Confirmed: 26917"
        ));
        assert!(html.ends_with("</tbody></table>"));
    }

    #[test]
    fn test_deserialize_engine_payload() {
        let json = r##"{
            "title": ["26 April"],
            "body": [{"before": [], "lines": ["Total Confirmed: 26917"], "after": []}],
            "labelColors": [{"backgroundColor": "#fff", "borderColor": "#D35400"}],
            "yAlign": "above",
            "xPadding": 6,
            "yPadding": 6,
            "_bodyFontFamily": "'Helvetica Neue'",
            "_bodyFontStyle": "normal",
            "opacity": 1
        }"##;
        let model: TooltipModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.y_align.as_deref(), Some("above"));
        assert_eq!(model.body.unwrap()[0].lines.len(), 1);
        assert_eq!(model.body_font_family, "'Helvetica Neue'");
    }
}
