//! Magnetic Barkhausen Noise (MBN) recording analyzer.
//!
//! Recordings arrive as tabular files, one table per recorded file, each row
//! carrying the amplitude sample in column index 1.  The core turns those
//! tables into averaged time-domain signals, extracts smoothed envelopes via
//! quadrature detection and a fixed 2nd-order Butterworth low-pass, and
//! characterizes each envelope by its peaks (amplitude, FWHM, prominence
//! ratio) and ringing count.
//!
//! Everything in [`dsp`] is pure and deterministic; per-table failures are
//! diagnostics, never batch aborts.

pub mod config;
pub mod data;
pub mod dsp;
pub mod report;

pub use config::AnalysisConfig;
pub use report::{analyze_all, run_pipeline, AnalysisOutcome, SignalReport};
