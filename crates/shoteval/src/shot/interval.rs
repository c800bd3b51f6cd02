//! Angular intervals and the sweep-line union.
//!
//! Intervals live on the bounded goal span (bearings in [-π/2, π/2]); there
//! is no wrap-around to handle.

/// Closed bearing interval `[start, end]`, radians, `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularInterval {
    pub start: f64,
    pub end: f64,
}

impl AngularInterval {
    /// Build from two bearings in any order.
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.start + self.end)
    }

    #[inline]
    pub fn contains(&self, bearing: f64) -> bool {
        self.start <= bearing && bearing <= self.end
    }

    /// Intersection with `other`; `None` when they do not meet at all.
    /// Intervals sharing a single endpoint yield a zero-width result.
    #[inline]
    pub fn clip_to(&self, other: &AngularInterval) -> Option<AngularInterval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        if start <= end {
            Some(AngularInterval { start, end })
        } else {
            None
        }
    }
}

/// Union of `intervals`, sorted by start, as disjoint intervals.
///
/// Gaps of width `<= eps_touch` are closed, so touching shadows merge into one.
pub fn merge_union(intervals: &[AngularInterval], eps_touch: f64) -> Vec<AngularInterval> {
    let mut sorted: Vec<AngularInterval> = intervals.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));
    let mut out: Vec<AngularInterval> = Vec::with_capacity(sorted.len());
    let mut iter = sorted.into_iter();
    let Some(mut cur) = iter.next() else {
        return out;
    };
    for next in iter {
        if next.start <= cur.end + eps_touch {
            cur.end = cur.end.max(next.end);
        } else {
            out.push(cur);
            cur = next;
        }
    }
    out.push(cur);
    out
}

/// Total measure of the union of `intervals`.
#[inline]
pub fn union_width(intervals: &[AngularInterval], eps_touch: f64) -> f64 {
    merge_union(intervals, eps_touch)
        .iter()
        .map(AngularInterval::width)
        .sum()
}

/// Parts of `span` not covered by `merged` (disjoint, sorted, inside `span`).
/// Zero-width leftovers are dropped.
pub fn complement_within(
    span: &AngularInterval,
    merged: &[AngularInterval],
) -> Vec<AngularInterval> {
    let mut out = Vec::new();
    let mut cursor = span.start;
    for iv in merged {
        let Some(iv) = iv.clip_to(span) else {
            continue;
        };
        if iv.start > cursor {
            out.push(AngularInterval {
                start: cursor,
                end: iv.start,
            });
        }
        cursor = cursor.max(iv.end);
    }
    if span.end > cursor {
        out.push(AngularInterval {
            start: cursor,
            end: span.end,
        });
    }
    out
}
