//! Blocked angle to success probability.

/// Success probability for a goal span of width `span_width` of which
/// `blocked` radians are shadowed.
///
/// `(1 - blocked / span_width) ^ open_exponent`, with the boundary cases
/// pinned: no span or full blockage gives 0, no blockage gives 1.
/// Depends only on the blocked fraction, so it does not care which side of
/// the goal is covered.
pub fn success_probability(span_width: f64, blocked: f64, open_exponent: f64) -> f64 {
    if span_width <= 0.0 || blocked >= span_width {
        return 0.0;
    }
    if blocked <= 0.0 {
        return 1.0;
    }
    let open = 1.0 - blocked / span_width;
    open.powf(open_exponent).clamp(0.0, 1.0)
}
