use crate::core::lms::{interpolate, value_at_z};
use crate::core::normal::percentile_to_z_score;
use crate::models::{CurvePoint, LmsPoint};

/// Standard reporting percentiles drawn on growth charts
pub const CANONICAL_PERCENTILES: [f64; 7] = [3.0, 10.0, 25.0, 50.0, 75.0, 90.0, 97.0];

/// Generate percentile curves at monthly resolution from 0 to `max_age_months` inclusive
///
/// Each value is obtained by mapping the canonical percentile to a Z-score and
/// back through the interpolated LMS triple for that month.
pub fn generate_curves(table: &[LmsPoint], max_age_months: u32) -> Vec<CurvePoint> {
    let z_scores = CANONICAL_PERCENTILES.map(|p| percentile_to_z_score(p / 100.0));

    (0..=max_age_months)
        .map(|age| {
            let lms = interpolate(age as f64, table);
            let [p3, p10, p25, p50, p75, p90, p97] = z_scores.map(|z| value_at_z(z, &lms));

            CurvePoint {
                age_months: age,
                p3,
                p10,
                p25,
                p50,
                p75,
                p90,
                p97,
            }
        })
        .collect()
}
