use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::GrowthError;

/// Biological sex used to select a reference table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            other => Err(GrowthError::InvalidArgument(format!(
                "sex must be one of: male, female (got {:?})",
                other
            ))),
        }
    }
}

/// One age-anchored LMS triple
///
/// `l` is the Box-Cox power, `m` the median and `s` the coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LmsPoint {
    #[serde(rename = "ageMonths")]
    pub age_months: u32,
    #[serde(rename = "L")]
    pub l: f64,
    #[serde(rename = "M")]
    pub m: f64,
    #[serde(rename = "S")]
    pub s: f64,
}

impl LmsPoint {
    pub const fn new(age_months: u32, l: f64, m: f64, s: f64) -> Self {
        Self { age_months, l, m, s }
    }
}

/// Clinical reading of a percentile, ordered from lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Interpretation {
    #[serde(rename = "severe low")]
    SevereLow,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "low-normal")]
    LowNormal,
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "high-normal")]
    HighNormal,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "severe high")]
    SevereHigh,
}

impl Interpretation {
    pub fn label(&self) -> &'static str {
        match self {
            Interpretation::SevereLow => "severe low",
            Interpretation::Low => "low",
            Interpretation::LowNormal => "low-normal",
            Interpretation::Normal => "normal",
            Interpretation::HighNormal => "high-normal",
            Interpretation::High => "high",
            Interpretation::SevereHigh => "severe high",
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Standardized position of a measurement against the reference population
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    #[serde(rename = "zScore")]
    pub z_score: f64,
    pub percentile: f64,
    pub interpretation: Interpretation,
}

/// Reference values for the canonical percentiles at one age
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    #[serde(rename = "ageMonths")]
    pub age_months: u32,
    pub p3: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub p97: f64,
}

impl CurvePoint {
    /// Values in ascending percentile order (p3 first)
    pub fn values(&self) -> [f64; 7] {
        [self.p3, self.p10, self.p25, self.p50, self.p75, self.p90, self.p97]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    LowPercentile,
    HighPercentile,
    Normal,
}

/// The measurement that triggered an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub weight: f64,
    #[serde(rename = "ageMonths")]
    pub age_months: u32,
    pub date: chrono::DateTime<chrono::Utc>,
}

/// Growth alert raised for a patient whose weight falls outside the normal band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    #[serde(rename = "patientId")]
    pub patient_id: String,
    #[serde(rename = "patientName")]
    pub patient_name: String,
    pub severity: AlertSeverity,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub percentile: f64,
    pub measurement: Measurement,
    #[serde(rename = "isAcknowledged", default)]
    pub is_acknowledged: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Aggregate counts over every stored alert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertStats {
    pub total: usize,
    pub critical: usize,
    pub warning: usize,
    pub unacknowledged: usize,
}

impl AlertStats {
    pub fn from_alerts<'a, I>(alerts: I) -> Self
    where
        I: IntoIterator<Item = &'a Alert>,
    {
        alerts.into_iter().fold(AlertStats::default(), |mut stats, alert| {
            stats.total += 1;
            match alert.severity {
                AlertSeverity::Critical => stats.critical += 1,
                AlertSeverity::Warning => stats.warning += 1,
                AlertSeverity::Normal => {}
            }
            if !alert.is_acknowledged {
                stats.unacknowledged += 1;
            }
            stats
        })
    }
}
