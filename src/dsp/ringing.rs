// ---------------------------------------------------------------------------
// Ringing counter: alternating excursions above a noise threshold
// ---------------------------------------------------------------------------

/// Count oscillation cycles of `x` as paired positive/negative excursions.
///
/// The noise gate is `threshold_ratio · max(|x|)`.  Strict local maxima of
/// `x` (positive excursions) and of `-x` (negative excursions) above the
/// gate are counted independently, boundary samples included (each is tested
/// against its single neighbor).  A flat run counts once per polarity.  One
/// ring is one positive/negative pair, so the result is
/// `ceil((pos + neg) / 2)` — an unmatched leftover still rounds up to a ring.
///
/// Fewer than two samples cannot oscillate and return 0.
pub fn count_ringing(x: &[f64], threshold_ratio: f64) -> usize {
    let n = x.len();
    if n < 2 {
        return 0;
    }

    let max_abs = x.iter().fold(0.0f64, |acc, &v| acc.max(v.abs()));
    let eps_val = threshold_ratio * max_abs;

    let mut pos = 0usize;
    let mut neg = 0usize;

    // First sample, tested against its single right neighbor.
    if x[0] > x[1] && x[0] > eps_val {
        pos += 1;
    }
    if -x[0] > -x[1] && -x[0] > eps_val {
        neg += 1;
    }

    // Interior samples; plateaus collapse to a single count per polarity.
    let mut i = 1;
    while i < n - 1 {
        if x[i] > x[i - 1] && x[i] > x[i + 1] && x[i] > eps_val {
            pos += 1;
            let mut j = i + 1;
            while j < n && x[j] == x[i] {
                j += 1;
            }
            i = j;
            continue;
        }
        let v = -x[i];
        if v > -x[i - 1] && v > -x[i + 1] && v > eps_val {
            neg += 1;
            let mut j = i + 1;
            while j < n && -x[j] == v {
                j += 1;
            }
            i = j;
            continue;
        }
        i += 1;
    }

    // Last sample, tested against its single left neighbor.
    if x[n - 1] > x[n - 2] && x[n - 1] > eps_val {
        pos += 1;
    }
    if -x[n - 1] > -x[n - 2] && -x[n - 1] > eps_val {
        neg += 1;
    }

    (pos + neg).div_ceil(2)
}
