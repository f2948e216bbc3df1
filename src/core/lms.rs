use crate::core::GrowthError;
use crate::models::LmsPoint;

/// Interpolate an LMS triple for an arbitrary age
///
/// Ages at or below the first anchor return the first anchor unchanged, ages at
/// or above the last anchor return the last anchor unchanged. In between, L, M
/// and S are linearly interpolated between the two bracketing anchors.
/// An empty slice yields a zero triple.
pub fn interpolate(age_months: f64, table: &[LmsPoint]) -> LmsPoint {
    let (first, last) = match (table.first(), table.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return LmsPoint::new(0, 0.0, 0.0, 0.0),
    };

    if age_months <= first.age_months as f64 {
        return first;
    }
    if age_months >= last.age_months as f64 {
        return last;
    }

    // First anchor strictly above the age; the clamps above guarantee 1..len
    let upper = table.partition_point(|p| (p.age_months as f64) <= age_months);
    let lo = table[upper - 1];
    let hi = table[upper];

    if (age_months - lo.age_months as f64).abs() < f64::EPSILON {
        return lo;
    }

    let t = (age_months - lo.age_months as f64) / (hi.age_months - lo.age_months) as f64;

    LmsPoint {
        age_months: age_months.floor() as u32,
        l: lerp(lo.l, hi.l, t),
        m: lerp(lo.m, hi.m, t),
        s: lerp(lo.s, hi.s, t),
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Box-Cox (LMS) transform of a raw measurement into a Z-score
pub fn z_score(value: f64, lms: &LmsPoint) -> Result<f64, GrowthError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(GrowthError::InvalidArgument(format!(
            "measurement must be a positive number (got {})",
            value
        )));
    }
    if !(lms.m > 0.0 && lms.s > 0.0 && lms.l.is_finite()) {
        return Err(GrowthError::InvalidArgument(format!(
            "LMS triple needs positive M and S (got M={}, S={})",
            lms.m, lms.s
        )));
    }

    let ratio = value / lms.m;
    let z = if lms.l.abs() < f64::EPSILON {
        ratio.ln() / lms.s
    } else {
        (ratio.powf(lms.l) - 1.0) / (lms.l * lms.s)
    };

    Ok(z)
}

/// Inverse LMS transform: the raw measurement sitting at `z`
///
/// Mirrors the `L == 0` branch of [`z_score`] with the exponential form.
pub fn value_at_z(z: f64, lms: &LmsPoint) -> f64 {
    if lms.l.abs() < f64::EPSILON {
        lms.m * (lms.s * z).exp()
    } else {
        lms.m * (1.0 + lms.l * lms.s * z).powf(1.0 / lms.l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<LmsPoint> {
        vec![
            LmsPoint::new(0, 0.3, 3.0, 0.14),
            LmsPoint::new(12, 0.1, 9.0, 0.11),
            LmsPoint::new(24, -0.1, 12.0, 0.12),
        ]
    }

    #[test]
    fn test_interpolate_clamps() {
        let table = table();
        assert_eq!(interpolate(-5.0, &table), table[0]);
        assert_eq!(interpolate(0.0, &table), table[0]);
        assert_eq!(interpolate(9999.0, &table), table[2]);
        assert_eq!(interpolate(24.0, &table), table[2]);
    }

    #[test]
    fn test_interpolate_midpoint() {
        let table = table();
        let mid = interpolate(6.0, &table);
        assert!((mid.l - 0.2).abs() < 1e-12);
        assert!((mid.m - 6.0).abs() < 1e-12);
        assert!((mid.s - 0.125).abs() < 1e-12);
        assert_eq!(mid.age_months, 6);
    }

    #[test]
    fn test_interpolate_exact_anchor() {
        let table = table();
        assert_eq!(interpolate(12.0, &table), table[1]);
    }

    #[test]
    fn test_z_score_at_median_is_zero() {
        let lms = LmsPoint::new(24, -0.0137, 12.1515, 0.11426);
        assert!(z_score(12.1515, &lms).unwrap().abs() < 1e-12);
    }

    #[test]
    fn test_z_score_log_branch() {
        let lms = LmsPoint::new(0, 0.0, 10.0, 0.1);
        let z = z_score(10.0 * 0.1f64.exp(), &lms).unwrap();
        assert!((z - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_z_score_rejects_non_positive() {
        let lms = LmsPoint::new(0, 0.3, 3.0, 0.14);
        assert!(matches!(z_score(0.0, &lms), Err(GrowthError::InvalidArgument(_))));
        assert!(matches!(z_score(-2.0, &lms), Err(GrowthError::InvalidArgument(_))));
        assert!(matches!(z_score(f64::NAN, &lms), Err(GrowthError::InvalidArgument(_))));
    }

    #[test]
    fn test_z_score_rejects_degenerate_triple() {
        let empty = interpolate(3.0, &[]);
        assert!(matches!(z_score(5.0, &empty), Err(GrowthError::InvalidArgument(_))));

        let zero_sigma = LmsPoint::new(0, 0.1, 9.0, 0.0);
        assert!(matches!(z_score(9.0, &zero_sigma), Err(GrowthError::InvalidArgument(_))));
    }

    #[test]
    fn test_value_at_z_inverts_z_score() {
        for lms in [LmsPoint::new(0, 0.0, 10.0, 0.1), LmsPoint::new(0, -0.2, 8.9, 0.12)] {
            for z in [-2.0, -0.5, 0.0, 1.0, 2.5] {
                let value = value_at_z(z, &lms);
                let back = z_score(value, &lms).unwrap();
                assert!((back - z).abs() < 1e-9, "z={} back={}", z, back);
            }
        }
    }
}
