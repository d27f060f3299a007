// Report sections: the typed building blocks of the final document.
//
// A section is a title, an anchor id derived from it, and a payload of one
// of four kinds. Sections carry no markup of their own; turning them into
// HTML is the renderer's job.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

use crate::text::normalize::strip_diacritics;

/// Anchor id used when a title has no alphanumeric characters at all.
pub const DEFAULT_SECTION_ID: &str = "section";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Image,
    Table,
    InteractivePlot,
    RawHtml,
}

/// An encoded image, embedded in the report as a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageArtifact {
    pub media_type: String,
    pub data_base64: String,
    pub alt: String,
}

impl ImageArtifact {
    /// Wrap an SVG document.
    pub fn svg(svg: &str, alt: impl Into<String>) -> Self {
        Self {
            media_type: "image/svg+xml".to_string(),
            data_base64: STANDARD.encode(svg.as_bytes()),
            alt: alt.into(),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data_base64)
    }
}

/// A plain table: header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row<S: Into<String>>(&mut self, cells: impl IntoIterator<Item = S>) {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn with_row<S: Into<String>>(mut self, cells: impl IntoIterator<Item = S>) -> Self {
        self.push_row(cells);
        self
    }
}

/// A Plotly figure: trace list and layout, drawn client-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotFigure {
    pub data: serde_json::Value,
    pub layout: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "kebab-case")]
pub enum SectionPayload {
    Image(ImageArtifact),
    Table(Table),
    InteractivePlot(PlotFigure),
    RawHtml(String),
}

impl SectionPayload {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionPayload::Image(_) => SectionKind::Image,
            SectionPayload::Table(_) => SectionKind::Table,
            SectionPayload::InteractivePlot(_) => SectionKind::InteractivePlot,
            SectionPayload::RawHtml(_) => SectionKind::RawHtml,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub id: String,
    pub title: String,
    pub payload: SectionPayload,
}

impl ReportSection {
    pub fn new(title: impl Into<String>, payload: SectionPayload) -> Self {
        let title = title.into();
        Self {
            id: slugify(&title),
            title,
            payload,
        }
    }

    pub fn kind(&self) -> SectionKind {
        self.payload.kind()
    }
}

/// Turn a title into a URL-safe anchor id.
///
/// Diacritics are stripped and the text lower-cased; every run of characters
/// that is not an ASCII letter or digit becomes a single '-', and leading or
/// trailing separators are dropped. Colliding ids are not disambiguated.
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    // Non-ASCII letters fall through to separators if stripping fails
    let ascii = strip_diacritics(&lower).unwrap_or(lower);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_separator = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }

    if slug.is_empty() {
        DEFAULT_SECTION_ID.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Top 10 bigrams"), "top-10-bigrams");
        assert_eq!(slugify("Résumé: Étude"), "resume-etude");
        assert_eq!(slugify("  --Tópicos después de Ablación--  "), "topicos-despues-de-ablacion");
        assert_eq!(slugify("t-SNE 3D"), "t-sne-3d");
        assert_eq!(slugify("!!!"), DEFAULT_SECTION_ID);
        assert_eq!(slugify(""), DEFAULT_SECTION_ID);
    }

    #[test]
    fn test_image_data_uri() {
        let image = ImageArtifact::svg("<svg/>", "empty");
        assert_eq!(image.data_uri(), "data:image/svg+xml;base64,PHN2Zy8+");
    }

    #[test]
    fn test_payload_kind() {
        let section = ReportSection::new("Raw", SectionPayload::RawHtml("<p>x</p>".to_string()));
        assert_eq!(section.kind(), SectionKind::RawHtml);
        assert_eq!(section.id, "raw");
    }
}
