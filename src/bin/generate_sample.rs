use anyhow::{Context, Result};

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

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_data.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;
    writer.write_record([
        "batch",
        "sampled_on",
        "operator",
        "fill_weight_g",
        "moisture_pct",
        "hardness_n",
        "ph",
        "remarks",
    ])?;

    let operators = ["Alice", "Bob", "Chen"];
    let n_batches = 60;

    for i in 0..n_batches {
        let day = i % 28 + 1;
        let month = i / 28 + 1;
        let weight = rng.gauss(500.0, 4.0);
        // Moisture tracks fill weight so the correlation view has signal.
        let moisture = 2.0 + (weight - 500.0) * 0.05 + rng.gauss(0.0, 0.1);
        let hardness = rng.gauss(85.0, 6.0);
        let ph = rng.gauss(6.8, 0.15);

        // A few gaps and typos, like hand-entered lab sheets.
        let hardness_cell = match i % 17 {
            5 => String::new(),
            11 => "n/a".to_string(),
            _ => format!("{hardness:.1}"),
        };
        let remarks = if i % 9 == 0 { "retest" } else { "" };

        writer.write_record([
            format!("B{:04}", 1000 + i),
            format!("{month}/{day}/2024"),
            operators[i % operators.len()].to_string(),
            format!("{weight:.2}"),
            format!("{moisture:.3}"),
            hardness_cell,
            format!("{ph:.2}"),
            remarks.to_string(),
        ])?;
    }
    writer.flush().context("writing output file")?;

    println!("Wrote {n_batches} batches to {output_path}");
    Ok(())
}
