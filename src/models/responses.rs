use serde::{Deserialize, Serialize};
use crate::models::domain::{Alert, CurvePoint, ScoreResult, Sex};

/// Result of assessing one patient measurement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub score: ScoreResult,
    pub alert: Option<Alert>,
}

/// Canonical percentile curves for one sex
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSet {
    pub sex: Sex,
    #[serde(rename = "maxAgeMonths")]
    pub max_age_months: u32,
    pub points: Vec<CurvePoint>,
}
