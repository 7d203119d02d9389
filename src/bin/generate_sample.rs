use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Samples per channel in the generated recording.
const ROWS: usize = 100_000;
/// Sensor channels.
const CHANNELS: usize = 5;
/// Acquisition sample spacing used for the synthetic time column.
const SAMPLE_PERIOD_S: f64 = 1e-5;

/// One synthetic Barkhausen burst: a damped oscillation at `freq_hz`
/// starting at sample `onset`.
fn burst(i: usize, onset: usize, freq_hz: f64, amplitude: f64) -> f64 {
    if i < onset {
        return 0.0;
    }
    let t = (i - onset) as f64 * SAMPLE_PERIOD_S;
    amplitude * (-t / 0.05).exp() * (2.0 * std::f64::consts::PI * freq_hz * t).sin()
}

fn sample_value(i: usize, channel: usize, rng: &mut SimpleRng) -> f64 {
    // Two excitation events per sweep, slightly offset per channel so the
    // averaged signal keeps distinct envelope peaks.
    let jitter = channel * 40;
    burst(i, ROWS / 4 + jitter, 850.0, 0.8)
        + burst(i, (3 * ROWS) / 4 + jitter, 620.0, 0.5)
        + rng.gauss(0.0, 0.01)
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn main() {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_mbn.parquet".to_string());

    let mut rng = SimpleRng::new(42);

    // Rows in channel-block order: channel 0's sweep first, then channel 1,
    // and so on — the layout the aggregator reshapes column-major.
    let total = ROWS * CHANNELS;
    let mut row_index = Vec::with_capacity(total);
    let mut amplitude = Vec::with_capacity(total);
    let mut time_s = Vec::with_capacity(total);
    let mut channel_id = Vec::with_capacity(total);

    for channel in 0..CHANNELS {
        for i in 0..ROWS {
            row_index.push((channel * ROWS + i) as i64);
            amplitude.push(sample_value(i, channel, &mut rng));
            time_s.push(i as f64 * SAMPLE_PERIOD_S);
            channel_id.push(channel as i64);
        }
    }

    if output_path.ends_with(".csv") {
        write_csv(&output_path, &row_index, &amplitude, &time_s, &channel_id);
    } else {
        write_parquet(&output_path, row_index, amplitude, time_s, channel_id);
    }

    println!("Wrote {total} rows ({CHANNELS} channels x {ROWS} samples) to {output_path}");
}

fn write_parquet(
    path: &str,
    row_index: Vec<i64>,
    amplitude: Vec<f64>,
    time_s: Vec<f64>,
    channel_id: Vec<i64>,
) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("row_index", DataType::Int64, false),
        Field::new("amplitude", DataType::Float64, false),
        Field::new("time_s", DataType::Float64, false),
        Field::new("channel", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(row_index)),
            Arc::new(Float64Array::from(amplitude)),
            Arc::new(Float64Array::from(time_s)),
            Arc::new(Int64Array::from(channel_id)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn write_csv(path: &str, row_index: &[i64], amplitude: &[f64], time_s: &[f64], channel_id: &[i64]) {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("Failed to create output file");
    for i in 0..row_index.len() {
        writer
            .write_record(&[
                row_index[i].to_string(),
                format!("{:.9}", amplitude[i]),
                format!("{:.6}", time_s[i]),
                channel_id[i].to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}
