use std::sync::Arc;
use validator::Validate;

use crate::core::{detect, GrowthEngine, GrowthError};
use crate::models::{Alert, AlertStats, AssessRequest, Assessment, Sex};
use crate::services::store::AlertStore;

/// Scores patient measurements and records the resulting alerts
///
/// The alert store is injected, so callers choose the backend.
#[derive(Clone)]
pub struct AssessmentService {
    engine: GrowthEngine,
    store: Arc<dyn AlertStore>,
}

impl AssessmentService {
    pub fn new(engine: GrowthEngine, store: Arc<dyn AlertStore>) -> Self {
        Self { engine, store }
    }

    pub fn engine(&self) -> &GrowthEngine {
        &self.engine
    }

    pub fn store(&self) -> &Arc<dyn AlertStore> {
        &self.store
    }

    /// Validate and assess a request
    pub async fn assess(&self, req: &AssessRequest) -> Result<Assessment, GrowthError> {
        if let Err(errors) = req.validate() {
            tracing::warn!("Rejected assessment for patient {:?}: {}", req.patient_id, errors);
            return Err(errors.into());
        }

        let sex = req.sex()?;
        self.assess_measurement(&req.patient_id, &req.patient_name, req.age_months, req.weight, sex)
            .await
    }

    /// Score a measurement, then save an alert if it falls outside the normal band
    ///
    /// A measurement inside the band leaves any existing alert for the patient
    /// untouched.
    pub async fn assess_measurement(
        &self,
        patient_id: &str,
        patient_name: &str,
        age_months: f64,
        weight: f64,
        sex: Sex,
    ) -> Result<Assessment, GrowthError> {
        let score = self.engine.score(age_months, weight, sex)?;

        let completed_months = completed_months(age_months)?;
        let alert = detect(score.percentile, patient_id, patient_name, weight, completed_months);

        if let Some(alert) = &alert {
            self.store.save(alert.clone()).await?;
            tracing::info!(
                "Raised {:?} {:?} alert for patient {} (percentile {:.1})",
                alert.severity,
                alert.alert_type,
                patient_id,
                score.percentile
            );
        } else {
            tracing::debug!(
                "Patient {} within normal band (percentile {:.1})",
                patient_id,
                score.percentile
            );
        }

        Ok(Assessment { score, alert })
    }

    pub async fn active_alerts(&self) -> Result<Vec<Alert>, GrowthError> {
        Ok(self.store.get_active().await?)
    }

    pub async fn patient_alert(&self, patient_id: &str) -> Result<Option<Alert>, GrowthError> {
        Ok(self.store.get_by_patient(patient_id).await?)
    }

    pub async fn acknowledge(&self, alert_id: &str) -> Result<bool, GrowthError> {
        let found = self.store.acknowledge(alert_id).await?;
        if !found {
            tracing::debug!("Acknowledge ignored, no alert {}", alert_id);
        }
        Ok(found)
    }

    pub async fn delete(&self, alert_id: &str) -> Result<bool, GrowthError> {
        Ok(self.store.delete(alert_id).await?)
    }

    pub async fn clear(&self) -> Result<u64, GrowthError> {
        Ok(self.store.clear().await?)
    }

    pub async fn stats(&self) -> Result<AlertStats, GrowthError> {
        Ok(self.store.stats().await?)
    }
}

/// Whole months recorded on an alert; bounded by what every store backend can hold
fn completed_months(age_months: f64) -> Result<u32, GrowthError> {
    let months = age_months.floor();
    if !(0.0..=i32::MAX as f64).contains(&months) {
        return Err(GrowthError::InvalidArgument(format!(
            "age {} months is too large to record",
            age_months
        )));
    }
    Ok(months as u32)
}
