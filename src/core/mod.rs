// Core algorithm exports
pub mod alerts;
pub mod classifier;
pub mod curves;
pub mod engine;
pub mod error;
pub mod lms;
pub mod normal;
pub mod reference;

pub use alerts::{classify_alert, detect};
pub use classifier::interpret;
pub use curves::{generate_curves, CANONICAL_PERCENTILES};
pub use engine::{GrowthEngine, OutOfRangePolicy};
pub use error::GrowthError;
pub use lms::{interpolate, value_at_z, z_score};
pub use normal::{normal_cdf, percentile_to_z_score, z_score_to_percentile};
pub use reference::ReferenceTable;
