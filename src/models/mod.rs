// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Alert, AlertSeverity, AlertStats, AlertType, CurvePoint, Interpretation, LmsPoint, Measurement, ScoreResult, Sex};
pub use requests::{AssessRequest, CurveRequest, ScoreRequest};
pub use responses::{Assessment, CurveSet};
