// topicscope: corpus analytics on top of an external topic model.
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline or one of the seams around it.

pub mod config;
pub mod corpus;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod projection;
pub mod report;
pub mod text;
pub mod topics;

pub use error::{AnalysisError, Result};
