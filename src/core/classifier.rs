use crate::models::Interpretation;

/// Map a percentile to its clinical interpretation
///
/// Low-side thresholds are exclusive (`< 3` is severe low) and high-side
/// thresholds inclusive (`<= 97` is still high), matching the signed-off bands:
///
/// | percentile   | interpretation |
/// |--------------|----------------|
/// | < 3          | severe low     |
/// | < 10         | low            |
/// | < 25         | low-normal     |
/// | <= 75        | normal         |
/// | <= 90        | high-normal    |
/// | <= 97        | high           |
/// | > 97         | severe high    |
pub fn interpret(percentile: f64) -> Interpretation {
    if percentile < 3.0 {
        Interpretation::SevereLow
    } else if percentile < 10.0 {
        Interpretation::Low
    } else if percentile < 25.0 {
        Interpretation::LowNormal
    } else if percentile <= 75.0 {
        Interpretation::Normal
    } else if percentile <= 90.0 {
        Interpretation::HighNormal
    } else if percentile <= 97.0 {
        Interpretation::High
    } else {
        Interpretation::SevereHigh
    }
}
