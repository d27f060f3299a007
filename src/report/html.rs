// HTML rendering of an assembled report.
//
// Produces one self-contained page: title, a navigation bar with one link per
// section (in section order), then each section body inside a collapsible
// card. Titles and table cells are escaped; image, plot and raw payloads are
// embedded as given.

use std::fmt::Write;

use super::section::{ImageArtifact, PlotFigure, ReportSection, SectionPayload, Table};

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
const BOOTSTRAP_JS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/js/bootstrap.bundle.min.js";
const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r#"
body { font-family: system-ui, -apple-system, "Segoe UI", Arial, sans-serif; background-color: #f5f5f7; }
.navbar-custom { background: linear-gradient(90deg, #111827, #1f2933); }
.navbar-brand, .navbar-nav .nav-link { color: #f9fafb !important; }
.navbar-nav .nav-link:hover { color: #e5e7eb !important; }
main { padding-top: 80px; }
summary { cursor: pointer; list-style: none; }
summary::-webkit-details-marker { display: none; }
"#;

/// Escape text for use in HTML element content and attribute values.
pub fn escape(text: &str) -> String {
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

/// Render the full page.
pub fn render(title: &str, sections: &[ReportSection]) -> String {
    let title = escape(title);
    let uses_plotly = sections
        .iter()
        .any(|s| matches!(s.payload, SectionPayload::InteractivePlot(_)));

    let mut nav = String::new();
    for section in sections {
        let _ = writeln!(
            nav,
            r##"<li class="nav-item"><a class="nav-link" href="#{}">{}</a></li>"##,
            escape(&section.id),
            escape(&section.title)
        );
    }

    let mut body = String::new();
    for (index, section) in sections.iter().enumerate() {
        let _ = write!(
            body,
            r#"<section id="{}" class="mb-5" data-kind="{}">
<details open class="card shadow-sm">
<summary class="card-header bg-light fw-semibold">{}</summary>
<div class="card-body">
{}
</div>
</details>
</section>
"#,
            escape(&section.id),
            kind_attr(&section.payload),
            escape(&section.title),
            render_payload(&section.payload, index)
        );
    }

    let plotly_script = if uses_plotly {
        format!(r#"<script src="{PLOTLY_JS}"></script>"#)
    } else {
        String::new()
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<meta name="viewport" content="width=device-width, initial-scale=1">
<link href="{BOOTSTRAP_CSS}" rel="stylesheet">
{plotly_script}
<style>{STYLE}</style>
</head>
<body>
<nav class="navbar navbar-expand-lg navbar-dark navbar-custom fixed-top shadow-sm">
<div class="container-fluid">
<a class="navbar-brand fw-bold" href="#top">{title}</a>
<button class="navbar-toggler" type="button" data-bs-toggle="collapse" data-bs-target="#navbarContent">
<span class="navbar-toggler-icon"></span>
</button>
<div class="collapse navbar-collapse" id="navbarContent">
<ul class="navbar-nav ms-auto mb-2 mb-lg-0">
{nav}</ul>
</div>
</div>
</nav>
<main class="container" id="top">
<div class="py-4">
<h1 class="mb-4">{title}</h1>
{body}</div>
</main>
<script src="{BOOTSTRAP_JS}"></script>
</body>
</html>
"##
    )
}

fn kind_attr(payload: &SectionPayload) -> &'static str {
    match payload {
        SectionPayload::Image(_) => "image",
        SectionPayload::Table(_) => "table",
        SectionPayload::InteractivePlot(_) => "interactive-plot",
        SectionPayload::RawHtml(_) => "raw-html",
    }
}

fn render_payload(payload: &SectionPayload, index: usize) -> String {
    match payload {
        SectionPayload::Image(image) => render_image(image),
        SectionPayload::Table(table) => render_table(table),
        SectionPayload::InteractivePlot(figure) => render_plot(figure, index),
        SectionPayload::RawHtml(html) => html.clone(),
    }
}

fn render_image(image: &ImageArtifact) -> String {
    format!(
        r#"<div class="text-center"><img src="{}" alt="{}" style="max-width:100%; height:auto;" class="img-fluid rounded shadow-sm"></div>"#,
        image.data_uri(),
        escape(&image.alt)
    )
}

fn render_table(table: &Table) -> String {
    let mut html = String::from(
        r#"<div class="table-responsive"><table class="table table-striped table-bordered table-hover align-middle"><thead><tr>"#,
    );
    for column in &table.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &table.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table></div>");
    html
}

fn render_plot(figure: &PlotFigure, index: usize) -> String {
    // `</` inside JSON strings would close the script element early
    let data = figure.data.to_string().replace("</", "<\\/");
    let layout = figure.layout.to_string().replace("</", "<\\/");
    format!(
        r#"<div id="plot-{index}"></div>
<script>Plotly.newPlot("plot-{index}", {data}, {layout});</script>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_table_cells_are_escaped() {
        let table = Table::new(["Word", "Count"]).with_row(["<b>", "3"]);
        let html = render_table(&table);
        assert!(html.contains("<th>Word</th>"));
        assert!(html.contains("<td>&lt;b&gt;</td>"));
    }

    #[test]
    fn test_plotly_script_only_when_needed() {
        let sections = vec![ReportSection::new(
            "Notes",
            SectionPayload::RawHtml("<p>hi</p>".to_string()),
        )];
        let page = render("T", &sections);
        assert!(!page.contains(PLOTLY_JS));
        assert!(page.contains("<p>hi</p>"));
        assert!(page.contains(r##"href="#notes""##));
    }

    #[test]
    fn test_page_shell_is_complete() {
        let page = render("Corpus", &[]);
        assert!(page.contains(r##"<a class="navbar-brand fw-bold" href="#top">Corpus</a>"##));
        assert!(page.contains(r##"data-bs-target="#navbarContent""##));
        assert!(page.contains(r#"<div class="collapse navbar-collapse" id="navbarContent">"#));
        assert!(page.contains(r#"<main class="container" id="top">"#));
        assert!(page.trim_end().ends_with("</html>"));
    }
}
