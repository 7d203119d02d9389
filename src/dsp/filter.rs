use std::f64::consts::PI;

// ---------------------------------------------------------------------------
// 2nd-order Butterworth low-pass (bilinear transform)
// ---------------------------------------------------------------------------

/// Apply a causal 2nd-order Butterworth low-pass filter to `x`.
///
/// Coefficients come from the standard bilinear transform with pre-warped
/// digital cutoff `Wn = tan(π · cutoff / fs)`.  The filter starts from rest
/// (implicit zero initial state) and keeps no state across calls.
///
/// No stability check is performed; the caller must supply
/// `cutoff_hz < fs / 2`.
pub fn butterworth_lowpass(x: &[f64], cutoff_hz: f64, fs: f64) -> Vec<f64> {
    let n = x.len();
    let mut y = vec![0.0; n];

    let wn = (PI * cutoff_hz / fs).tan();
    let wn2 = wn * wn;
    let norm = 1.0 + std::f64::consts::SQRT_2 * wn + wn2;

    let b0 = wn2 / norm;
    let b1 = 2.0 * b0;
    let b2 = b0;
    let a1 = 2.0 * (wn2 - 1.0) / norm;
    let a2 = (1.0 - std::f64::consts::SQRT_2 * wn + wn2) / norm;

    for i in 0..n {
        let mut yv = b0 * x[i];
        if i > 0 {
            yv += b1 * x[i - 1] - a1 * y[i - 1];
        }
        if i > 1 {
            yv += b2 * x[i - 2] - a2 * y[i - 2];
        }
        y[i] = yv;
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_input_stays_zero() {
        let y = butterworth_lowpass(&[0.0; 64], 20.0, 10_000.0);
        assert!(y.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(butterworth_lowpass(&[], 20.0, 10_000.0).is_empty());
    }

    #[test]
    fn vanishing_cutoff_blocks_everything() {
        let x: Vec<f64> = (0..256).map(|i| (i as f64 * 0.3).sin()).collect();
        let y = butterworth_lowpass(&x, 1e-9, 10_000.0);
        assert!(y.iter().all(|&v| v.abs() < 1e-6));
    }

    #[test]
    fn dc_passes_through() {
        // A low-pass filter must converge to the input level on a constant.
        let x = vec![1.0; 4096];
        let y = butterworth_lowpass(&x, 100.0, 10_000.0);
        let tail = y[y.len() - 1];
        assert!((tail - 1.0).abs() < 1e-3, "settled at {tail}");
    }

    #[test]
    fn high_frequency_is_attenuated() {
        // 2 kHz tone through a 20 Hz low-pass at fs = 10 kHz.
        let fs = 10_000.0;
        let x: Vec<f64> = (0..4096)
            .map(|i| (2.0 * PI * 2_000.0 * i as f64 / fs).sin())
            .collect();
        let y = butterworth_lowpass(&x, 20.0, fs);
        let peak_out = y[512..].iter().cloned().fold(0.0f64, |a, v| a.max(v.abs()));
        assert!(peak_out < 1e-3, "residual {peak_out}");
    }
}
