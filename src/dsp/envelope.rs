use crate::dsp::filter::butterworth_lowpass;

// ---------------------------------------------------------------------------
// Envelope extraction: quadrature detection + low-pass + sqrt recovery
// ---------------------------------------------------------------------------

/// Extract the smoothed amplitude envelope of every signal in the matrix.
///
/// For each signal `x`:
/// 1. quadrature/square detection: `x2[j] = 2 · x[j]²`
/// 2. 2nd-order Butterworth low-pass of `x2` at `cutoff_hz` / `fs`
/// 3. recovery: `env[j] = 2 · √max(0, y[j])`
///
/// Filter ringing can push the low-passed power slightly negative; those
/// samples are clamped to zero before the square root, so the envelope is
/// always non-negative.  Output shape matches the input matrix exactly and
/// signals never interact.
pub fn extract_envelopes(signals: &[Vec<f64>], cutoff_hz: f64, fs: f64) -> Vec<Vec<f64>> {
    signals
        .iter()
        .map(|x| extract_envelope(x, cutoff_hz, fs))
        .collect()
}

/// Envelope of a single signal.  Same length as the input.
pub fn extract_envelope(x: &[f64], cutoff_hz: f64, fs: f64) -> Vec<f64> {
    let squared: Vec<f64> = x.iter().map(|&v| 2.0 * v * v).collect();
    let filtered = butterworth_lowpass(&squared, cutoff_hz, fs);
    filtered
        .iter()
        .map(|&y| 2.0 * y.max(0.0).sqrt())
        .collect()
}
