// Topic analytics: ablation, outlier profiling and overview tables on top
// of an external topic model.

pub mod ablation;
pub mod outliers;
pub mod overview;
pub mod snapshot;
pub mod traits;
