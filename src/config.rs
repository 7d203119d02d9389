use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// All fixed constants of the analysis pipeline.
///
/// The defaults mirror the acquisition setup this tool was written for;
/// every one of them can be overridden (the CLI exposes the common knobs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Samples per channel in one recording.
    pub rows: usize,
    /// Sensor channels per recording.  Deployed rigs exist with 5 and with
    /// 10 channels, so this is configuration, not a constant.
    pub channels: usize,
    /// Envelope low-pass cutoff in Hz.
    pub envelope_cutoff_hz: f64,
    /// Nominal sampling frequency used by the envelope low-pass, in Hz.
    /// A design parameter of the smoothing stage; it intentionally does not
    /// track the acquisition rate of the source data.
    pub envelope_fs_hz: f64,
    /// Sampling frequency used to convert peak widths into seconds, in Hz.
    pub peak_fs_hz: f64,
    /// Minimum peak prominence as a fraction of the global maximum, in (0, 1].
    pub min_prominence_ratio: f64,
    /// Ringing noise gate for envelope analysis, as a fraction of max |x|.
    pub ringing_threshold_ratio: f64,
    /// Ringing noise gate used by the raw-signal statistics summary.  The
    /// raw trace is noisier than the envelope, hence the higher gate.
    pub raw_ringing_threshold_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            rows: 100_000,
            channels: 5,
            envelope_cutoff_hz: 20.0,
            envelope_fs_hz: 10_000.0,
            peak_fs_hz: 100_000.0,
            min_prominence_ratio: 0.2,
            ringing_threshold_ratio: 0.01,
            raw_ringing_threshold_ratio: 0.02,
        }
    }
}
