use std::fmt;

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::data::model::RawTable;
use crate::dsp::{average_tables, count_ringing, extract_envelopes, find_peaks, Peak};

// ---------------------------------------------------------------------------
// Per-signal feature report
// ---------------------------------------------------------------------------

/// All features computed for one accepted recording: time-domain statistics
/// of the averaged signal plus peak and ringing characteristics of its
/// envelope.
#[derive(Debug, Clone, Serialize)]
pub struct SignalReport {
    /// Position among the accepted recordings (not the original file list;
    /// rejected tables leave no gap).
    pub index: usize,
    /// Mean absolute value of the averaged signal.
    pub mean_abs: f64,
    /// Root mean square of the averaged signal.
    pub rms: f64,
    /// Ringing count of the averaged signal (raw noise gate).
    pub raw_ringing: usize,
    /// Ringing count of the envelope.
    pub envelope_ringing: usize,
    /// Envelope peaks in scan order.
    pub peaks: Vec<Peak>,
}

/// Analyze one signal/envelope pair.
pub fn analyze_signal(
    signal: &[f64],
    envelope: &[f64],
    index: usize,
    config: &AnalysisConfig,
) -> SignalReport {
    let n = signal.len();
    let (mut sum_abs, mut sum_sq) = (0.0, 0.0);
    for &v in signal {
        sum_abs += v.abs();
        sum_sq += v * v;
    }
    let (mean_abs, rms) = if n > 0 {
        (sum_abs / n as f64, (sum_sq / n as f64).sqrt())
    } else {
        (0.0, 0.0)
    };

    SignalReport {
        index,
        mean_abs,
        rms,
        raw_ringing: count_ringing(signal, config.raw_ringing_threshold_ratio),
        envelope_ringing: count_ringing(envelope, config.ringing_threshold_ratio),
        peaks: find_peaks(envelope, config.peak_fs_hz, config.min_prominence_ratio),
    }
}

/// Analyze every signal/envelope pair of the two index-aligned matrices.
pub fn analyze_all(
    signals: &[Vec<f64>],
    envelopes: &[Vec<f64>],
    config: &AnalysisConfig,
) -> Vec<SignalReport> {
    signals
        .iter()
        .zip(envelopes.iter())
        .enumerate()
        .map(|(index, (signal, envelope))| analyze_signal(signal, envelope, index, config))
        .collect()
}

impl fmt::Display for SignalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Signal {} Features ===", self.index + 1)?;
        writeln!(f, "Mean_Value[{}] = {:.15}", self.index, self.mean_abs)?;
        writeln!(f, "RMS_Value[{}]  = {:.7}", self.index, self.rms)?;
        writeln!(f, "Number of ringing = {}", self.raw_ringing)?;
        writeln!(f, "Ringing Count = {}", self.envelope_ringing)?;
        for (j, p) in self.peaks.iter().enumerate() {
            writeln!(
                f,
                "Peak {}: amplitude={:.3}, FWHM={:.6} s, ratio={:.3}",
                j + 1,
                p.amplitude,
                p.fwhm,
                p.ratio
            )?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

/// Result of running the whole pipeline on a batch of tables.
#[derive(Debug, Clone, Default)]
pub struct AnalysisOutcome {
    /// Averaged signal per accepted table, in original relative order.
    pub signals: Vec<Vec<f64>>,
    /// Envelope per signal, index-aligned with `signals`.
    pub envelopes: Vec<Vec<f64>>,
    /// Feature report per signal, index-aligned with `signals`.
    pub reports: Vec<SignalReport>,
}

/// Run aggregation, envelope extraction, and feature analysis on a batch of
/// raw tables.  Per-table failures are logged and skipped inside the
/// aggregator; nothing here aborts the batch.
pub fn run_pipeline(tables: &[RawTable], config: &AnalysisConfig) -> AnalysisOutcome {
    let signals = average_tables(tables, config.rows, config.channels);
    let envelopes = extract_envelopes(&signals, config.envelope_cutoff_hz, config.envelope_fs_hz);
    let reports = analyze_all(&signals, &envelopes, config);
    AnalysisOutcome {
        signals,
        envelopes,
        reports,
    }
}
