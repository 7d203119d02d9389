use serde::Serialize;

// ---------------------------------------------------------------------------
// Peak detection with prominence filtering and FWHM
// ---------------------------------------------------------------------------

/// A detected local maximum.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Peak {
    /// Signal value at the peak.
    pub amplitude: f64,
    /// Full width at half maximum, in seconds.
    pub fwhm: f64,
    /// Amplitude divided by FWHM (`f64::INFINITY` when the width is zero).
    pub ratio: f64,
}

/// Find local maxima of `signal` whose prominence is at least
/// `min_prominence_ratio` times the global maximum, and measure their width.
///
/// * `fs` converts sample-index widths into seconds.
/// * Interior indices are tested as strict local maxima; after an accepted
///   peak the scan skips past any run of equal values so a plateau is
///   reported once.
/// * The final sample is additionally tested against its single left
///   neighbor; the first sample is never tested as a standalone peak.  This
///   asymmetry is deliberate and kept as-is.  Note that the walk-based
///   prominence of a sample sitting on the boundary is zero (the missing
///   side counts as a wall at peak height), so the final-sample check can
///   only ever pass a non-positive prominence threshold.
/// * A signal whose global maximum is not above floating-point epsilon is
///   treated as silence and yields no peaks (a zero prominence threshold
///   would otherwise accept arbitrarily small wiggles).
///
/// Peaks are returned in left-to-right scan order.
pub fn find_peaks(signal: &[f64], fs: f64, min_prominence_ratio: f64) -> Vec<Peak> {
    let mut peaks = Vec::new();
    let n = signal.len();
    if n < 3 {
        return peaks;
    }

    let global_max = signal.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if global_max <= f64::EPSILON {
        return peaks;
    }
    let prom_thresh = global_max * min_prominence_ratio;

    let mut i = 1;
    while i < n - 1 {
        if signal[i] > signal[i - 1] && signal[i] > signal[i + 1] {
            let prom = prominence(signal, i);
            if prom >= prom_thresh {
                peaks.push(measure_peak(signal, i, fs));

                // Skip the rest of a flat run so a plateau counts once.
                let mut j = i + 1;
                while j < n && signal[j] == signal[i] {
                    j += 1;
                }
                i = j - 1;
            }
        }
        i += 1;
    }

    // The last sample can be a right-boundary peak.
    let last = n - 1;
    if signal[last] > signal[last - 1] && prominence(signal, last) >= prom_thresh {
        peaks.push(measure_peak(signal, last, fs));
    }

    peaks
}

/// Height of the peak at `idx` above the higher of its two nearest
/// non-exceeding valleys.  Each walk tracks the minimum seen and stops at
/// the first value >= the peak, or at the boundary.
fn prominence(signal: &[f64], idx: usize) -> f64 {
    let peak = signal[idx];
    let n = signal.len();

    let mut min_left = peak;
    let mut l = idx;
    while l > 0 && signal[l - 1] < peak {
        l -= 1;
        min_left = min_left.min(signal[l]);
    }

    let mut min_right = peak;
    let mut r = idx;
    while r + 1 < n && signal[r + 1] < peak {
        r += 1;
        min_right = min_right.min(signal[r]);
    }

    peak - min_left.max(min_right)
}

/// FWHM and amplitude/width ratio for an accepted peak at `idx`.
fn measure_peak(signal: &[f64], idx: usize, fs: f64) -> Peak {
    let amplitude = signal[idx];
    let half = amplitude / 2.0;
    let n = signal.len();

    let mut l = idx;
    while l > 0 && signal[l] > half {
        l -= 1;
    }
    let mut r = idx;
    while r < n - 1 && signal[r] > half {
        r += 1;
    }

    let fwhm = (r - l) as f64 / fs;
    let ratio = if fwhm > 0.0 {
        amplitude / fwhm
    } else {
        f64::INFINITY
    };

    Peak {
        amplitude,
        fwhm,
        ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS: f64 = 100.0;

    #[test]
    fn too_short_signal_has_no_peaks() {
        assert!(find_peaks(&[1.0, 2.0], FS, 0.2).is_empty());
        assert!(find_peaks(&[], FS, 0.2).is_empty());
    }

    #[test]
    fn silent_signal_has_no_peaks() {
        assert!(find_peaks(&[0.0; 32], FS, 0.2).is_empty());
    }

    #[test]
    fn triangular_pulse_yields_exactly_one_peak() {
        // Strictly increasing to 5.0 at index 5, then strictly decreasing.
        let signal: Vec<f64> = (0..=5)
            .map(|i| i as f64)
            .chain((0..5).rev().map(|i| i as f64))
            .collect();
        let peaks = find_peaks(&signal, FS, 0.2);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].amplitude, 5.0);
    }

    #[test]
    fn fwhm_counts_samples_above_half_maximum() {
        // Peak 4.0 at index 3, half = 2.0.  Walking left from the peak stops
        // at index 1 (value 2.0, not > half); walking right stops at index 5.
        let signal = [0.0, 2.0, 3.0, 4.0, 3.0, 2.0, 0.0];
        let peaks = find_peaks(&signal, FS, 0.2);
        assert_eq!(peaks.len(), 1);
        assert!((peaks[0].fwhm - 4.0 / FS).abs() < 1e-12);
        assert!((peaks[0].ratio - 4.0 / (4.0 / FS)).abs() < 1e-9);
    }

    #[test]
    fn raising_the_prominence_ratio_filters_monotonically() {
        // Big peak (10) and small peak (2) separated by a deep valley.
        let signal = [0.0, 10.0, 0.5, 2.0, 0.0, 1.0, 0.2];
        let loose = find_peaks(&signal, FS, 0.05);
        let strict = find_peaks(&signal, FS, 1.0);
        assert!(strict.len() <= loose.len());
        for p in &strict {
            assert!(loose.iter().any(|q| q.amplitude == p.amplitude));
        }
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].amplitude, 10.0);
    }

    #[test]
    fn boundary_samples_are_never_reported_as_peaks() {
        // Rising to the right edge: the final sample is tested, but its
        // walk-based prominence is zero, so it cannot pass the threshold.
        let rising = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert!(find_peaks(&rising, FS, 0.2).is_empty());
        assert_eq!(prominence(&rising, 4), 0.0);

        // Falling from the left edge: the first sample is never even tested.
        let falling = [4.0, 3.0, 2.0, 1.0, 0.0];
        assert!(find_peaks(&falling, FS, 0.2).is_empty());
    }

    #[test]
    fn interior_peak_next_to_the_edge_is_still_found() {
        let signal = [0.0, 4.0, 1.0, 0.5, 0.2];
        let peaks = find_peaks(&signal, FS, 0.2);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].amplitude, 4.0);
    }

    #[test]
    fn prominence_uses_the_higher_valley() {
        // Peak 5 at index 3.  The left walk passes 2 and 1 and stops at
        // index 0 (6 >= 5), so min_left = 1; the right walk reaches the end
        // with min_right = 0.  Baseline is the higher wall: 5 - 1 = 4.
        let signal = [6.0, 1.0, 2.0, 5.0, 1.0, 0.0, 0.5];
        assert!((prominence(&signal, 3) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn scan_order_is_left_to_right() {
        let signal = [0.0, 3.0, 0.0, 5.0, 0.0, 4.0, 0.0];
        let peaks = find_peaks(&signal, FS, 0.1);
        let amps: Vec<f64> = peaks.iter().map(|p| p.amplitude).collect();
        assert_eq!(amps, vec![3.0, 5.0, 4.0]);
    }
}
