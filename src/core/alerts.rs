use chrono::Utc;
use uuid::Uuid;

use crate::models::{Alert, AlertSeverity, AlertType, Measurement};

/// Decide whether a percentile warrants an alert
///
/// Returns `None` inside the normal band (3 to 90 inclusive); no alert is ever
/// produced with `Normal` severity.
pub fn classify_alert(percentile: f64) -> Option<(AlertSeverity, AlertType)> {
    if percentile < 3.0 {
        Some((AlertSeverity::Critical, AlertType::LowPercentile))
    } else if percentile < 10.0 {
        Some((AlertSeverity::Warning, AlertType::LowPercentile))
    } else if percentile > 97.0 {
        Some((AlertSeverity::Critical, AlertType::HighPercentile))
    } else if percentile > 90.0 {
        Some((AlertSeverity::Warning, AlertType::HighPercentile))
    } else {
        None
    }
}

/// Build an alert for a measurement outside the normal band
pub fn detect(
    percentile: f64,
    patient_id: &str,
    patient_name: &str,
    weight: f64,
    age_months: u32,
) -> Option<Alert> {
    let (severity, alert_type) = classify_alert(percentile)?;
    let now = Utc::now();

    Some(Alert {
        id: Uuid::new_v4().to_string(),
        patient_id: patient_id.to_string(),
        patient_name: patient_name.to_string(),
        severity,
        alert_type,
        message: alert_message(severity, alert_type, percentile),
        percentile,
        measurement: Measurement {
            weight,
            age_months,
            date: now,
        },
        is_acknowledged: false,
        created_at: now,
    })
}

fn alert_message(severity: AlertSeverity, alert_type: AlertType, percentile: f64) -> String {
    match (severity, alert_type) {
        (AlertSeverity::Critical, AlertType::LowPercentile) => format!(
            "Critical: weight-for-age at the {:.1} percentile, below P3 (severe underweight risk)",
            percentile
        ),
        (_, AlertType::LowPercentile) => format!(
            "Warning: weight-for-age at the {:.1} percentile, below P10",
            percentile
        ),
        (AlertSeverity::Critical, AlertType::HighPercentile) => format!(
            "Critical: weight-for-age at the {:.1} percentile, above P97 (severe overweight risk)",
            percentile
        ),
        _ => format!(
            "Warning: weight-for-age at the {:.1} percentile, above P90",
            percentile
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        assert_eq!(
            classify_alert(2.9),
            Some((AlertSeverity::Critical, AlertType::LowPercentile))
        );
        assert_eq!(
            classify_alert(3.0),
            Some((AlertSeverity::Warning, AlertType::LowPercentile))
        );
        assert_eq!(classify_alert(10.0), None);
        assert_eq!(classify_alert(50.0), None);
        assert_eq!(classify_alert(90.0), None);
        assert_eq!(
            classify_alert(90.5),
            Some((AlertSeverity::Warning, AlertType::HighPercentile))
        );
        assert_eq!(
            classify_alert(97.0),
            Some((AlertSeverity::Warning, AlertType::HighPercentile))
        );
        assert_eq!(
            classify_alert(97.1),
            Some((AlertSeverity::Critical, AlertType::HighPercentile))
        );
    }

    #[test]
    fn test_detect_builds_alert() {
        let alert = detect(1.234, "p-1", "Ada", 5.0, 12).unwrap();
        assert_eq!(alert.patient_id, "p-1");
        assert_eq!(alert.patient_name, "Ada");
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.alert_type, AlertType::LowPercentile);
        assert!(alert.message.contains("1.2"));
        assert!(!alert.is_acknowledged);
        assert_eq!(alert.measurement.weight, 5.0);
        assert_eq!(alert.measurement.age_months, 12);
        assert_eq!(alert.measurement.date, alert.created_at);
    }

    #[test]
    fn test_detect_normal_band_is_none() {
        assert!(detect(50.0, "p-1", "Ada", 9.0, 12).is_none());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = detect(1.0, "p-1", "Ada", 5.0, 12).unwrap();
        let b = detect(1.0, "p-1", "Ada", 5.0, 12).unwrap();
        assert_ne!(a.id, b.id);
    }
}
