use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::GrowthError;
use crate::models::domain::Sex;

/// Upper bound accepted for curve requests, in months
pub const MAX_CURVE_REQUEST_MONTHS: u32 = 240;

/// Request to score a single weight measurement
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScoreRequest {
    #[validate(range(min = 0.0))]
    #[serde(alias = "age_months", rename = "ageMonths")]
    pub age_months: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub weight: f64,
    pub sex: String,
}

impl ScoreRequest {
    pub fn sex(&self) -> Result<Sex, GrowthError> {
        self.sex.parse()
    }
}

/// Request to generate reference curves
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CurveRequest {
    pub sex: String,
    #[serde(default = "default_max_age_months")]
    #[validate(range(max = 240))]
    #[serde(alias = "max_age_months", rename = "maxAgeMonths")]
    pub max_age_months: u32,
}

impl CurveRequest {
    pub fn sex(&self) -> Result<Sex, GrowthError> {
        self.sex.parse()
    }
}

fn default_max_age_months() -> u32 {
    60
}

/// Request to score a patient's measurement and raise an alert when needed
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssessRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "patient_id", rename = "patientId")]
    pub patient_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "patient_name", rename = "patientName")]
    pub patient_name: String,
    #[validate(range(min = 0.0))]
    #[serde(alias = "age_months", rename = "ageMonths")]
    pub age_months: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub weight: f64,
    pub sex: String,
}

impl AssessRequest {
    pub fn sex(&self) -> Result<Sex, GrowthError> {
        self.sex.parse()
    }
}

impl From<validator::ValidationErrors> for GrowthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        GrowthError::InvalidArgument(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_request_validation() {
        let ok = ScoreRequest {
            age_months: 12.0,
            weight: 9.5,
            sex: "female".to_string(),
        };
        assert!(ok.validate().is_ok());

        let zero_weight = ScoreRequest {
            weight: 0.0,
            ..ok.clone()
        };
        assert!(zero_weight.validate().is_err());

        let negative_age = ScoreRequest {
            age_months: -1.0,
            ..ok
        };
        assert!(negative_age.validate().is_err());
    }

    #[test]
    fn test_assess_request_requires_patient_id() {
        let req: AssessRequest = serde_json::from_str(
            r#"{"patientId":"","patientName":"Ada","ageMonths":6,"weight":7.1,"sex":"female"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_curve_request_defaults() {
        let req: CurveRequest = serde_json::from_str(r#"{"sex":"male"}"#).unwrap();
        assert_eq!(req.max_age_months, 60);
        assert_eq!(req.sex().unwrap(), Sex::Male);
        assert!(req.validate().is_ok());

        let too_long = CurveRequest {
            max_age_months: MAX_CURVE_REQUEST_MONTHS + 1,
            ..req
        };
        assert!(too_long.validate().is_err());
    }
}
