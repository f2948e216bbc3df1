use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

use crate::config::DatabaseSettings;
use crate::models::{Alert, AlertSeverity, AlertStats, AlertType, Measurement};
use crate::services::store::{AlertStore, StoreError};

/// Alert severity as stored in PostgreSQL
#[derive(Debug, Clone, Copy, sqlx::Type)]
#[sqlx(type_name = "alert_severity", rename_all = "lowercase")]
pub enum PgAlertSeverity {
    Critical,
    Warning,
    Normal,
}

impl From<AlertSeverity> for PgAlertSeverity {
    fn from(value: AlertSeverity) -> Self {
        match value {
            AlertSeverity::Critical => PgAlertSeverity::Critical,
            AlertSeverity::Warning => PgAlertSeverity::Warning,
            AlertSeverity::Normal => PgAlertSeverity::Normal,
        }
    }
}

impl From<PgAlertSeverity> for AlertSeverity {
    fn from(value: PgAlertSeverity) -> Self {
        match value {
            PgAlertSeverity::Critical => AlertSeverity::Critical,
            PgAlertSeverity::Warning => AlertSeverity::Warning,
            PgAlertSeverity::Normal => AlertSeverity::Normal,
        }
    }
}

/// Alert type as stored in PostgreSQL
#[derive(Debug, Clone, Copy, sqlx::Type)]
#[sqlx(type_name = "alert_type", rename_all = "snake_case")]
pub enum PgAlertType {
    LowPercentile,
    HighPercentile,
    Normal,
}

impl From<AlertType> for PgAlertType {
    fn from(value: AlertType) -> Self {
        match value {
            AlertType::LowPercentile => PgAlertType::LowPercentile,
            AlertType::HighPercentile => PgAlertType::HighPercentile,
            AlertType::Normal => PgAlertType::Normal,
        }
    }
}

impl From<PgAlertType> for AlertType {
    fn from(value: PgAlertType) -> Self {
        match value {
            PgAlertType::LowPercentile => AlertType::LowPercentile,
            PgAlertType::HighPercentile => AlertType::HighPercentile,
            PgAlertType::Normal => AlertType::Normal,
        }
    }
}

const SELECT_ALERTS: &str = r#"
    SELECT id, patient_id, patient_name, severity, alert_type, message,
           percentile, weight, age_months, measured_at, is_acknowledged, created_at
    FROM growth_alerts
"#;

/// PostgreSQL-backed alert store
///
/// The unique index on `patient_id` keeps one alert per patient; `save` is a
/// single upsert inside a transaction, so concurrent writers for the same
/// patient cannot leave two rows behind.
pub struct PostgresAlertStore {
    pool: PgPool,
}

impl PostgresAlertStore {
    /// Connect and run pending migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!(
            "Connecting to PostgreSQL alert store (max: {} connections)",
            settings.max_connections
        );

        Self::new(
            &settings.url,
            settings.max_connections,
            settings.min_connections,
            Duration::from_secs(settings.acquire_timeout_secs),
            Duration::from_secs(settings.idle_timeout_secs),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    async fn fetch_where(&self, clause: &str, bind: Option<&str>) -> Result<Vec<Alert>, StoreError> {
        let sql = format!("{} {} ORDER BY created_at ASC", SELECT_ALERTS, clause);
        let mut query = sqlx::query(&sql);
        if let Some(value) = bind {
            query = query.bind(value);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(alert_from_row).collect()
    }
}

fn alert_from_row(row: &PgRow) -> Result<Alert, StoreError> {
    let age_months: i32 = row.try_get("age_months")?;
    let age_months = u32::try_from(age_months)
        .map_err(|_| StoreError::Decode(format!("negative age_months {}", age_months)))?;
    let severity: PgAlertSeverity = row.try_get("severity")?;
    let alert_type: PgAlertType = row.try_get("alert_type")?;

    Ok(Alert {
        id: row.try_get("id")?,
        patient_id: row.try_get("patient_id")?,
        patient_name: row.try_get("patient_name")?,
        severity: severity.into(),
        alert_type: alert_type.into(),
        message: row.try_get("message")?,
        percentile: row.try_get("percentile")?,
        measurement: Measurement {
            weight: row.try_get("weight")?,
            age_months,
            date: row.try_get("measured_at")?,
        },
        is_acknowledged: row.try_get("is_acknowledged")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl AlertStore for PostgresAlertStore {
    async fn save(&self, alert: Alert) -> Result<(), StoreError> {
        let age_months = i32::try_from(alert.measurement.age_months)
            .map_err(|_| StoreError::Decode(format!("age_months {} too large", alert.measurement.age_months)))?;

        let query = r#"
            INSERT INTO growth_alerts (
                id, patient_id, patient_name, severity, alert_type, message,
                percentile, weight, age_months, measured_at, is_acknowledged, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (patient_id)
            DO UPDATE SET
                id = EXCLUDED.id,
                patient_name = EXCLUDED.patient_name,
                severity = EXCLUDED.severity,
                alert_type = EXCLUDED.alert_type,
                message = EXCLUDED.message,
                percentile = EXCLUDED.percentile,
                weight = EXCLUDED.weight,
                age_months = EXCLUDED.age_months,
                measured_at = EXCLUDED.measured_at,
                is_acknowledged = EXCLUDED.is_acknowledged,
                created_at = EXCLUDED.created_at
        "#;

        let mut tx = self.pool.begin().await?;
        sqlx::query(query)
            .bind(&alert.id)
            .bind(&alert.patient_id)
            .bind(&alert.patient_name)
            .bind(PgAlertSeverity::from(alert.severity))
            .bind(PgAlertType::from(alert.alert_type))
            .bind(&alert.message)
            .bind(alert.percentile)
            .bind(alert.measurement.weight)
            .bind(age_months)
            .bind(alert.measurement.date)
            .bind(alert.is_acknowledged)
            .bind(alert.created_at)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!("Saved alert {} for patient {}", alert.id, alert.patient_id);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Alert>, StoreError> {
        self.fetch_where("", None).await
    }

    async fn get_active(&self) -> Result<Vec<Alert>, StoreError> {
        self.fetch_where("WHERE is_acknowledged = FALSE", None).await
    }

    async fn get_by_patient(&self, patient_id: &str) -> Result<Option<Alert>, StoreError> {
        let mut alerts = self.fetch_where("WHERE patient_id = $1", Some(patient_id)).await?;
        Ok(alerts.pop())
    }

    async fn acknowledge(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("UPDATE growth_alerts SET is_acknowledged = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM growth_alerts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM growth_alerts")
            .execute(&self.pool)
            .await?;

        tracing::info!("Cleared {} alerts", result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn stats(&self) -> Result<AlertStats, StoreError> {
        let query = r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE severity = 'critical') as critical,
                COUNT(*) FILTER (WHERE severity = 'warning') as warning,
                COUNT(*) FILTER (WHERE NOT is_acknowledged) as unacknowledged
            FROM growth_alerts
        "#;

        let row = sqlx::query(query).fetch_one(&self.pool).await?;
        let count = |column: &str| -> Result<usize, StoreError> {
            let value: i64 = row.try_get(column)?;
            Ok(value.max(0) as usize)
        };

        Ok(AlertStats {
            total: count("total")?,
            critical: count("critical")?,
            warning: count("warning")?,
            unacknowledged: count("unacknowledged")?,
        })
    }
}
