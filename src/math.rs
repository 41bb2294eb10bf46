// Small numeric helpers that aren't tied to pixels.

/// Linearly map `value` from [from_source, to_source] onto [from_target, to_target].
/// The result is not clamped; values outside the source range extrapolate.
#[inline]
pub fn map(value: f64, from_source: f64, to_source: f64, from_target: f64, to_target: f64) -> f64 {
    (value - from_source) / (to_source - from_source) * (to_target - from_target) + from_target
}
