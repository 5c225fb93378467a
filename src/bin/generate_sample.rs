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

struct RoofProfile {
    label: &'static str,
    base_rate: f64,
    base_attempts: f64,
    base_dist: f64,
    bin_rates: [f64; 4],
}

const SEASONS: std::ops::RangeInclusive<u16> = 2015..=2019;
const BINS: [&str; 4] = ["17-29", "30-39", "40-49", "50+"];

const PROFILES: [RoofProfile; 2] = [
    RoofProfile {
        label: "indoor",
        base_rate: 0.862,
        base_attempts: 290.0,
        base_dist: 37.1,
        bin_rates: [0.970, 0.930, 0.840, 0.680],
    },
    RoofProfile {
        label: "outdoor",
        base_rate: 0.812,
        base_attempts: 640.0,
        base_dist: 37.8,
        bin_rates: [0.962, 0.905, 0.775, 0.575],
    },
];

struct SeasonSample {
    season: u16,
    label: &'static str,
    attempts: u32,
    makes: u32,
    avg_dist: f64,
}

fn simulate_seasons(rng: &mut SimpleRng) -> Vec<SeasonSample> {
    let mut samples = Vec::new();
    for profile in &PROFILES {
        for season in SEASONS {
            let attempts = rng
                .gauss(profile.base_attempts, profile.base_attempts * 0.06)
                .round()
                .max(1.0) as u32;
            let rate = rng.gauss(profile.base_rate, 0.015).clamp(0.0, 1.0);
            let makes = (rate * attempts as f64).round().min(attempts as f64) as u32;
            samples.push(SeasonSample {
                season,
                label: profile.label,
                attempts,
                makes,
                avg_dist: rng.gauss(profile.base_dist, 0.5),
            });
        }
    }
    samples
}

fn write_season_table(samples: &[SeasonSample]) {
    let mut writer =
        csv::Writer::from_path("fg_by_season_roof.csv").expect("creating fg_by_season_roof.csv");
    writer
        .write_record(["season", "roof_norm", "fg_pct", "attempts", "avg_dist"])
        .expect("writing header");
    for s in samples {
        let fg_pct = s.makes as f64 / s.attempts as f64;
        writer
            .write_record([
                s.season.to_string(),
                s.label.to_string(),
                format!("{fg_pct:.4}"),
                s.attempts.to_string(),
                format!("{:.1}", s.avg_dist),
            ])
            .expect("writing season row");
    }
    writer.flush().expect("flushing fg_by_season_roof.csv");
}

fn write_by_roof_table(samples: &[SeasonSample]) {
    let mut writer = csv::Writer::from_path("fg_by_roof.csv").expect("creating fg_by_roof.csv");
    writer
        .write_record(["roof_norm", "fg_pct", "attempts", "makes", "avg_dist"])
        .expect("writing header");
    for profile in &PROFILES {
        let rows: Vec<&SeasonSample> = samples
            .iter()
            .filter(|s| s.label == profile.label)
            .collect();
        let attempts: u32 = rows.iter().map(|s| s.attempts).sum();
        let makes: u32 = rows.iter().map(|s| s.makes).sum();
        let dist_sum: f64 = rows
            .iter()
            .map(|s| s.avg_dist * s.attempts as f64)
            .sum();
        let fg_pct = makes as f64 / attempts.max(1) as f64;
        writer
            .write_record([
                profile.label.to_string(),
                format!("{fg_pct:.4}"),
                attempts.to_string(),
                makes.to_string(),
                format!("{:.1}", dist_sum / attempts.max(1) as f64),
            ])
            .expect("writing by-roof row");
    }
    writer.flush().expect("flushing fg_by_roof.csv");
}

fn write_distbin_table(rng: &mut SimpleRng) {
    let mut writer = csv::Writer::from_path("fg_by_roof_distbins.csv")
        .expect("creating fg_by_roof_distbins.csv");
    writer
        .write_record(["dist_bin", "roof_norm", "fg_pct"])
        .expect("writing header");
    for (bi, bin) in BINS.iter().enumerate() {
        for profile in &PROFILES {
            let rate = rng
                .gauss(profile.bin_rates[bi], 0.008)
                .clamp(0.0, 1.0);
            writer
                .write_record([bin.to_string(), profile.label.to_string(), format!("{rate:.4}")])
                .expect("writing distance-bin row");
        }
    }
    writer.flush().expect("flushing fg_by_roof_distbins.csv");
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let samples = simulate_seasons(&mut rng);
    write_season_table(&samples);
    write_by_roof_table(&samples);
    write_distbin_table(&mut rng);

    println!(
        "Wrote fg_by_roof.csv, fg_by_roof_distbins.csv, fg_by_season_roof.csv ({} season rows)",
        samples.len()
    );
}
