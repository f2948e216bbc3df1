use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::{Alert, AlertStats};

/// Errors that can occur in an alert store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid stored alert: {0}")]
    Decode(String),
}

/// Keyed collection of growth alerts
///
/// Holds at most one alert per patient: `save` replaces whatever the patient
/// had before. `acknowledge` and `delete` on unknown ids are no-ops and
/// return `false`.
#[async_trait]
pub trait AlertStore: Send + Sync {
    /// Insert an alert, superseding any existing alert for the same patient
    async fn save(&self, alert: Alert) -> Result<(), StoreError>;

    /// Every stored alert, acknowledged or not
    async fn get_all(&self) -> Result<Vec<Alert>, StoreError>;

    /// Alerts not yet acknowledged
    async fn get_active(&self) -> Result<Vec<Alert>, StoreError> {
        let alerts = self.get_all().await?;
        Ok(alerts.into_iter().filter(|a| !a.is_acknowledged).collect())
    }

    async fn get_by_patient(&self, patient_id: &str) -> Result<Option<Alert>, StoreError>;

    async fn acknowledge(&self, id: &str) -> Result<bool, StoreError>;

    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// Remove every alert, returning how many were removed
    async fn clear(&self) -> Result<u64, StoreError>;

    /// Counts over the entire stored set
    async fn stats(&self) -> Result<AlertStats, StoreError> {
        let alerts = self.get_all().await?;
        Ok(AlertStats::from_alerts(&alerts))
    }
}

/// In-process alert store
///
/// All mutations run under one lock, so the remove-then-insert in `save` is
/// atomic with respect to concurrent callers.
#[derive(Debug, Default)]
pub struct MemoryAlertStore {
    alerts: Mutex<Vec<Alert>>,
}

impl MemoryAlertStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertStore for MemoryAlertStore {
    async fn save(&self, alert: Alert) -> Result<(), StoreError> {
        let mut alerts = self.alerts.lock().await;
        let before = alerts.len();
        alerts.retain(|a| a.patient_id != alert.patient_id);

        tracing::debug!(
            "Saving alert {} for patient {} (superseded {})",
            alert.id,
            alert.patient_id,
            before - alerts.len()
        );

        alerts.push(alert);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Alert>, StoreError> {
        Ok(self.alerts.lock().await.clone())
    }

    async fn get_by_patient(&self, patient_id: &str) -> Result<Option<Alert>, StoreError> {
        let alerts = self.alerts.lock().await;
        Ok(alerts.iter().find(|a| a.patient_id == patient_id).cloned())
    }

    async fn acknowledge(&self, id: &str) -> Result<bool, StoreError> {
        let mut alerts = self.alerts.lock().await;
        match alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.is_acknowledged = true;
                tracing::debug!("Acknowledged alert {}", id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut alerts = self.alerts.lock().await;
        let before = alerts.len();
        alerts.retain(|a| a.id != id);
        Ok(alerts.len() < before)
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let mut alerts = self.alerts.lock().await;
        let removed = alerts.len() as u64;
        alerts.clear();

        tracing::info!("Cleared {} alerts", removed);
        Ok(removed)
    }
}
