// Report: typed sections, chart artifacts and HTML rendering.

pub mod assembler;
pub mod charts;
pub mod html;
pub mod section;

pub use assembler::Report;
pub use section::{slugify, ImageArtifact, PlotFigure, ReportSection, SectionKind, SectionPayload, Table};
