// Chart artifacts for the report: SVG bar charts, an SVG word cloud and
// Plotly 3D scatters.
//
// Bar charts and the word cloud are rendered server-side to SVG and embedded
// as images. The 3D scatter plots stay interactive, so they are emitted as
// Plotly figure JSON and drawn in the browser.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde_json::json;

use super::html::escape;
use super::section::{ImageArtifact, PlotFigure};

/// Categorical colors cycled over topics and bars.
const SERIES_COLORS: [&str; 8] = [
    "#000000", "#E69F00", "#56B4E9", "#009E73", "#F0E442", "#0072B2", "#D55E00", "#CC79A7",
];

const BAR_COLOR: &str = "#0072B2";

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 160.0;

/// Vertical bar chart with rotated category labels.
pub fn bar_chart_svg(title: &str, labels: &[String], values: &[usize], x_label: &str, y_label: &str) -> String {
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let max = values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let slot = plot_w / labels.len().max(1) as f64;
    let bar_w = slot * 0.7;

    let mut svg = String::new();
    // Writing into a String cannot fail
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    );
    let _ = write!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = write!(
        svg,
        r#"<text x="{}" y="30" text-anchor="middle" font-size="18">{}</text>"#,
        WIDTH / 2.0,
        escape(title)
    );

    // Axes
    let base_y = MARGIN_TOP + plot_h;
    let _ = write!(
        svg,
        r##"<line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{base_y}" stroke="#333"/><line x1="{MARGIN_LEFT}" y1="{base_y}" x2="{}" y2="{base_y}" stroke="#333"/>"##,
        WIDTH - MARGIN_RIGHT
    );

    for (i, (label, &value)) in labels.iter().zip(values).enumerate() {
        let h = value as f64 / max * plot_h;
        let x = MARGIN_LEFT + i as f64 * slot + (slot - bar_w) / 2.0;
        let y = base_y - h;
        let cx = x + bar_w / 2.0;
        let _ = write!(
            svg,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{bar_w:.1}" height="{h:.1}" fill="{BAR_COLOR}"><title>{}: {value}</title></rect>"#,
            escape(label)
        );
        let _ = write!(
            svg,
            r#"<text x="{cx:.1}" y="{:.1}" text-anchor="middle" font-size="11">{value}</text>"#,
            y - 4.0
        );
        let _ = write!(
            svg,
            r#"<text x="{cx:.1}" y="{:.1}" text-anchor="end" font-size="12" transform="rotate(-60 {cx:.1} {:.1})">{}</text>"#,
            base_y + 14.0,
            base_y + 14.0,
            escape(label)
        );
    }

    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="13">{}</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        HEIGHT - 8.0,
        escape(x_label)
    );
    let _ = write!(
        svg,
        r#"<text x="16" y="{:.1}" text-anchor="middle" font-size="13" transform="rotate(-90 16 {:.1})">{}</text>"#,
        MARGIN_TOP + plot_h / 2.0,
        MARGIN_TOP + plot_h / 2.0,
        escape(y_label)
    );
    svg.push_str("</svg>");
    svg
}

/// Bar chart wrapped as an embeddable image.
pub fn bar_chart_image(title: &str, labels: &[String], values: &[usize]) -> ImageArtifact {
    let svg = bar_chart_svg(title, labels, values, "N-grams", "Frequency");
    ImageArtifact::svg(&svg, title)
}

const CLOUD_MIN_FONT: f64 = 14.0;
const CLOUD_MAX_FONT: f64 = 72.0;
const CLOUD_PADDING: f64 = 16.0;
/// Approximate advance width of a sans-serif glyph, relative to font size.
const GLYPH_WIDTH: f64 = 0.6;

struct CloudWord<'a> {
    word: &'a str,
    size: f64,
    width: f64,
}

#[derive(Default)]
struct CloudRow<'a> {
    words: Vec<CloudWord<'a>>,
    width: f64,
    height: f64,
}

/// Word cloud laid out in centered rows, most frequent word first.
///
/// Font size scales linearly with frequency between the smallest and the
/// largest count. Words that do not fit in the canvas are left out.
pub fn word_cloud_svg(title: &str, words: &[(String, usize)]) -> String {
    let max = words.iter().map(|(_, c)| *c).max().unwrap_or(0) as f64;
    let min = words.iter().map(|(_, c)| *c).min().unwrap_or(0) as f64;
    let span = (max - min).max(1.0);
    let usable_w = WIDTH - 2.0 * CLOUD_PADDING;

    let mut rows: Vec<CloudRow> = vec![CloudRow::default()];
    for (word, count) in words {
        let size = CLOUD_MIN_FONT + (*count as f64 - min) / span * (CLOUD_MAX_FONT - CLOUD_MIN_FONT);
        let width = word.chars().count() as f64 * size * GLYPH_WIDTH;
        if width > usable_w {
            continue;
        }
        let gap = size * GLYPH_WIDTH;
        let full = rows
            .last()
            .is_some_and(|r| !r.words.is_empty() && r.width + gap + width > usable_w);
        if full {
            rows.push(CloudRow::default());
        }
        let Some(row) = rows.last_mut() else { break };
        if !row.words.is_empty() {
            row.width += gap;
        }
        row.width += width;
        row.height = row.height.max(size * 1.15);
        row.words.push(CloudWord { word, size, width });
    }

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
    );
    let _ = write!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
    let _ = write!(
        svg,
        r#"<text x="{}" y="30" text-anchor="middle" font-size="18">{}</text>"#,
        WIDTH / 2.0,
        escape(title)
    );

    let mut top = MARGIN_TOP;
    let mut color = 0;
    for row in rows.iter().filter(|r| !r.words.is_empty()) {
        if top + row.height > HEIGHT - CLOUD_PADDING {
            break;
        }
        let baseline = top + row.height * 0.8;
        let mut x = (WIDTH - row.width) / 2.0;
        for word in &row.words {
            let _ = write!(
                svg,
                r#"<text x="{x:.1}" y="{baseline:.1}" font-size="{:.1}" fill="{}">{}</text>"#,
                word.size,
                SERIES_COLORS[color % SERIES_COLORS.len()],
                escape(word.word)
            );
            x += word.width + word.size * GLYPH_WIDTH;
            color += 1;
        }
        top += row.height;
    }
    svg.push_str("</svg>");
    svg
}

/// Word cloud wrapped as an embeddable image.
pub fn word_cloud_image(title: &str, words: &[(String, usize)]) -> ImageArtifact {
    ImageArtifact::svg(&word_cloud_svg(title, words), title)
}

/// 3D scatter with one trace per topic, so the legend toggles topics.
///
/// `points` and `topics` are parallel: one topic id per point.
pub fn scatter_3d_figure(title: &str, points: &[[f64; 3]], topics: &[i64]) -> PlotFigure {
    let mut by_topic: BTreeMap<i64, Vec<[f64; 3]>> = BTreeMap::new();
    for (point, &topic) in points.iter().zip(topics) {
        by_topic.entry(topic).or_default().push(*point);
    }

    let traces: Vec<serde_json::Value> = by_topic
        .iter()
        .enumerate()
        .map(|(i, (topic, pts))| {
            json!({
                "type": "scatter3d",
                "mode": "markers",
                "name": topic.to_string(),
                "x": pts.iter().map(|p| p[0]).collect::<Vec<_>>(),
                "y": pts.iter().map(|p| p[1]).collect::<Vec<_>>(),
                "z": pts.iter().map(|p| p[2]).collect::<Vec<_>>(),
                "marker": {"size": 4, "color": SERIES_COLORS[i % SERIES_COLORS.len()]},
                "hovertemplate": format!("topic {topic}<extra></extra>"),
            })
        })
        .collect();

    PlotFigure {
        data: serde_json::Value::Array(traces),
        layout: json!({
            "title": {"text": title},
            "width": 900,
            "height": 700,
            "legend": {"title": {"text": "topic"}},
        }),
    }
}
