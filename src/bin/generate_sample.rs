use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

/// Roughly the shape of the CSIRO record: ~0.06 in/yr, steepening after 1990.
fn sea_level(year: i64, rng: &mut SimpleRng) -> f64 {
    let t = (year - 1880) as f64;
    let acceleration = ((year - 1990).max(0) as f64).powi(2) * 0.0015;
    0.062 * t + acceleration + rng.gauss(0.0, 0.25)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let years: Vec<i64> = (1880..=2013).collect();
    let levels: Vec<f64> = years.iter().map(|&y| sea_level(y, &mut rng)).collect();

    // CSV, same header as the EPA export
    let csv_path = "sea_level_data.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV")?;
    writer.write_record(["Year", "CSIRO Adjusted Sea Level"])?;
    for (year, level) in years.iter().zip(&levels) {
        writer.write_record([year.to_string(), format!("{level:.9}")])?;
    }
    writer.flush()?;

    // Parquet with the same two columns
    let schema = Arc::new(Schema::new(vec![
        Field::new("Year", DataType::Int64, false),
        Field::new("CSIRO Adjusted Sea Level", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(years.clone())),
            Arc::new(Float64Array::from(levels)),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "sea_level_data.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing writer")?;

    println!(
        "Wrote {} yearly observations to {csv_path} and {parquet_path}",
        years.len()
    );
    Ok(())
}
