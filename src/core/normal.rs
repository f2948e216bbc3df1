//! Conversions between Z-scores and percentiles.
//!
//! The two directions use independent approximations and are not exact
//! inverses of each other. Coefficients are fixed so that previously computed
//! scores and curves stay reproducible.

// Zelen & Severo rational approximation of the standard normal CDF
const CDF_P: f64 = 0.2316419;
const CDF_D: f64 = 0.3989423;
const CDF_B1: f64 = 0.3193815;
const CDF_B2: f64 = -0.3565638;
const CDF_B3: f64 = 1.781478;
const CDF_B4: f64 = -1.821256;
const CDF_B5: f64 = 1.330274;

// Rational approximation of the normal quantile
const Q_C0: f64 = 2.515517;
const Q_C1: f64 = 0.802853;
const Q_C2: f64 = 0.010328;
const Q_D1: f64 = 1.432788;
const Q_D2: f64 = 0.189269;
const Q_D3: f64 = 0.001308;

/// Standard normal cumulative distribution function
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    let t = 1.0 / (1.0 + CDF_P * x.abs());
    let d = CDF_D * (-x * x / 2.0).exp();
    let p = d * t * (CDF_B1 + t * (CDF_B2 + t * (CDF_B3 + t * (CDF_B4 + t * CDF_B5))));

    if x > 0.0 {
        1.0 - p
    } else {
        p
    }
}

/// Percentile (0-100) of a Z-score
#[inline]
pub fn z_score_to_percentile(z: f64) -> f64 {
    normal_cdf(z) * 100.0
}

/// Z-score of a probability in the open interval (0, 1)
///
/// Returns 0 for `p <= 0` or `p >= 1` instead of failing: curve generation
/// is lenient about its inputs.
pub fn percentile_to_z_score(p: f64) -> f64 {
    if !(p > 0.0 && p < 1.0) {
        return 0.0;
    }

    let t = (-2.0 * p.min(1.0 - p).ln()).sqrt();
    let z = t - (Q_C0 + Q_C1 * t + Q_C2 * t * t) / (1.0 + Q_D1 * t + Q_D2 * t * t + Q_D3 * t * t * t);

    if p < 0.5 {
        -z
    } else {
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_is_fiftieth_percentile() {
        assert!((z_score_to_percentile(0.0) - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_known_quantiles() {
        assert!((z_score_to_percentile(1.96) - 97.5).abs() < 0.01);
        assert!((z_score_to_percentile(-1.96) - 2.5).abs() < 0.01);
        assert!((percentile_to_z_score(0.975) - 1.96).abs() < 1e-3);
        assert!((percentile_to_z_score(0.025) + 1.96).abs() < 1e-3);
    }

    #[test]
    fn test_percentile_symmetry() {
        for z in [0.3, 1.0, 1.5, 2.7] {
            let sum = z_score_to_percentile(z) + z_score_to_percentile(-z);
            assert!((sum - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_percentile_to_z_out_of_range_is_zero() {
        assert_eq!(percentile_to_z_score(0.0), 0.0);
        assert_eq!(percentile_to_z_score(1.0), 0.0);
        assert_eq!(percentile_to_z_score(-0.3), 0.0);
        assert_eq!(percentile_to_z_score(50.0), 0.0);
        assert_eq!(percentile_to_z_score(f64::NAN), 0.0);
    }

    #[test]
    fn test_round_trip_within_tolerance() {
        for p in [3.0, 10.0, 25.0, 50.0, 75.0, 90.0, 97.0] {
            let back = z_score_to_percentile(percentile_to_z_score(p / 100.0));
            assert!((back - p).abs() <= 0.1, "p={} back={}", p, back);
        }
    }
}
