//! Production bonus sliding scale.
//!
//! The bonus percentage is a step function of the performance ratio. The
//! step reached applies to all eligible revenue, not just the part above
//! the threshold.

use rust_decimal::Decimal;

use crate::config::{ScaleThreshold, SlidingScale};

/// Returns the highest threshold whose performance ratio is at or below
/// `ratio`, if any.
pub fn matched_threshold(ratio: Decimal, scale: &SlidingScale) -> Option<&ScaleThreshold> {
    scale
        .thresholds
        .iter()
        .take_while(|threshold| threshold.performance_ratio <= ratio)
        .last()
}

/// Resolves the bonus percentage for an optional performance ratio.
///
/// With no ratio, or a ratio below every threshold, the scale's base
/// percentage applies. Threshold boundaries are inclusive.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::resolve_bonus_percentage;
/// use crew_planner::config::SlidingScale;
/// use rust_decimal::Decimal;
///
/// let scale = SlidingScale::default();
///
/// // Exactly on the 1.2 threshold
/// let pct = resolve_bonus_percentage(Some(Decimal::new(12, 1)), &scale);
/// assert_eq!(pct, Decimal::new(12, 2));
///
/// // Between 1.2 and 1.3 stays on the 1.2 step
/// let pct = resolve_bonus_percentage(Some(Decimal::new(125, 2)), &scale);
/// assert_eq!(pct, Decimal::new(12, 2));
///
/// // No ratio supplied
/// assert_eq!(resolve_bonus_percentage(None, &scale), Decimal::new(10, 2));
/// ```
pub fn resolve_bonus_percentage(ratio: Option<Decimal>, scale: &SlidingScale) -> Decimal {
    ratio
        .and_then(|ratio| matched_threshold(ratio, scale))
        .map(|threshold| threshold.bonus_percentage)
        .unwrap_or(scale.base_percentage)
}
