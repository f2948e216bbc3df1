use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::core::{
    classifier::interpret,
    curves::generate_curves,
    lms::{interpolate, z_score},
    normal::z_score_to_percentile,
    GrowthError, ReferenceTable,
};
use crate::models::{CurveRequest, CurvePoint, CurveSet, LmsPoint, ScoreRequest, ScoreResult, Sex};

/// What to do with ages past the last reference anchor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfRangePolicy {
    /// Score against the last anchor
    #[default]
    Clamp,
    /// Reject with `GrowthError::AgeOutOfRange`
    Error,
}

/// Scoring facade over a reference table
///
/// Validates caller input (sex, age, weight) before any numeric work and
/// applies the configured out-of-range policy. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GrowthEngine {
    table: Arc<ReferenceTable>,
    policy: OutOfRangePolicy,
}

impl GrowthEngine {
    pub fn new(table: ReferenceTable, policy: OutOfRangePolicy) -> Self {
        Self {
            table: Arc::new(table),
            policy,
        }
    }

    /// WHO weight-for-age standards with clamping
    pub fn with_defaults() -> Self {
        Self::new(ReferenceTable::who_weight_for_age(), OutOfRangePolicy::Clamp)
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    pub fn policy(&self) -> OutOfRangePolicy {
        self.policy
    }

    /// Interpolated LMS triple for a validated age
    pub fn lms_at(&self, sex: Sex, age_months: f64) -> Result<LmsPoint, GrowthError> {
        if !age_months.is_finite() || age_months < 0.0 {
            return Err(GrowthError::InvalidArgument(format!(
                "age must be a non-negative number of months (got {})",
                age_months
            )));
        }

        let max = self.table.max_age_months(sex);
        if age_months > max as f64 {
            match self.policy {
                OutOfRangePolicy::Error => {
                    return Err(GrowthError::AgeOutOfRange { age: age_months, max });
                }
                OutOfRangePolicy::Clamp => {
                    tracing::warn!(
                        "Age {} months exceeds {} reference range, clamping to {} months",
                        age_months,
                        sex,
                        max
                    );
                }
            }
        }

        Ok(interpolate(age_months, self.table.for_sex(sex)))
    }

    /// Score a weight measurement
    pub fn score(&self, age_months: f64, weight: f64, sex: Sex) -> Result<ScoreResult, GrowthError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(GrowthError::InvalidArgument(format!(
                "weight must be a positive number of kilograms (got {})",
                weight
            )));
        }

        let lms = self.lms_at(sex, age_months)?;
        let z = z_score(weight, &lms)?;
        let percentile = z_score_to_percentile(z).clamp(0.0, 100.0);

        Ok(ScoreResult {
            z_score: z,
            percentile,
            interpretation: interpret(percentile),
        })
    }

    /// Canonical percentile curves from birth to `max_age_months`
    pub fn curves(&self, sex: Sex, max_age_months: u32) -> Vec<CurvePoint> {
        generate_curves(self.table.for_sex(sex), max_age_months)
    }

    pub fn score_request(&self, req: &ScoreRequest) -> Result<ScoreResult, GrowthError> {
        req.validate()?;
        self.score(req.age_months, req.weight, req.sex()?)
    }

    pub fn curve_request(&self, req: &CurveRequest) -> Result<CurveSet, GrowthError> {
        req.validate()?;
        let sex = req.sex()?;

        Ok(CurveSet {
            sex,
            max_age_months: req.max_age_months,
            points: self.curves(sex, req.max_age_months),
        })
    }
}

impl Default for GrowthEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
