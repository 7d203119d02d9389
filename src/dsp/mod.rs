/// Signal-processing core.  Pure, stateless transformations:
///
/// ```text
///   raw tables ──aggregate──▶ Signal Matrix ──envelope──▶ Envelope Matrix
///                                              (filter)        │
///                                                  ┌───────────┴──────────┐
///                                                  ▼                      ▼
///                                               peaks                 ringing
/// ```
///
/// The two matrices are index-aligned by construction; rejected tables
/// never leave a placeholder.

pub mod aggregate;
pub mod envelope;
pub mod filter;
pub mod peaks;
pub mod ringing;

pub use aggregate::{average_table, average_tables, TableRejection};
pub use envelope::{extract_envelope, extract_envelopes};
pub use filter::butterworth_lowpass;
pub use peaks::{find_peaks, Peak};
pub use ringing::count_ringing;
