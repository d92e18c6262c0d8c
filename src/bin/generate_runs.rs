use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use runplot::data::writer::format_sci;

/// Write synthetic `{name}-{n}.txt` learning curves for trying out runplot
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
struct Args {
    /// Directory to write the run files into
    #[arg(value_name = "OUT_DIR", default_value = "sample_runs")]
    out_dir: PathBuf,

    /// Runs per experiment
    #[arg(value_name = "RUNS", default_value_t = 10)]
    runs: usize,

    /// Steps per run
    #[arg(long, default_value_t = 500)]
    steps: usize,

    /// Base seed; each experiment and run derives its own stream from it
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// A synthetic experiment: a noisy curve approaching `target` with time
/// constant `tau`.
struct Experiment {
    name: &'static str,
    target: f64,
    tau: f64,
    noise: f64,
}

const EXPERIMENTS: [Experiment; 2] = [
    Experiment { name: "fast_learner", target: 100.0, tau: 60.0, noise: 15.0 },
    Experiment { name: "slow_learner", target: 80.0, tau: 180.0, noise: 10.0 },
];

impl Experiment {
    fn curve(&self, steps: usize, rng: &mut RunRng) -> Vec<f64> {
        (0..steps)
            .map(|t| {
                let progress = 1.0 - (-(t as f64) / self.tau).exp();
                self.target * progress + self.noise * rng.standard_normal()
            })
            .collect()
    }
}

/// xoshiro256** stream seeded per run, so adding runs never changes the
/// earlier ones.
struct RunRng {
    state: [u64; 4],
}

impl RunRng {
    fn for_run(seed: u64, experiment: &str, run: usize) -> Self {
        // FNV-1a over the experiment name keeps streams apart across names.
        let name_hash = experiment
            .bytes()
            .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| (h ^ b as u64).wrapping_mul(0x0100_0000_01b3));
        let mut x = seed ^ name_hash ^ (run as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);

        // splitmix64 expansion into the four state words
        let mut state = [0u64; 4];
        for slot in &mut state {
            x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = x;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            *slot = z ^ (z >> 31);
        }
        RunRng { state }
    }

    fn next_u64(&mut self) -> u64 {
        let s = &mut self.state;
        let result = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = s[1] << 17;
        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];
        s[2] ^= t;
        s[3] = s[3].rotate_left(45);
        result
    }

    /// Uniform in [0, 1).
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller
    fn standard_normal(&mut self) -> f64 {
        let u1 = self.unit().max(1e-15);
        let u2 = self.unit();
        (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

/// Write every experiment's runs into `out_dir`; returns the number of files.
fn write_runs(out_dir: &Path, runs: usize, steps: usize, seed: u64) -> Result<usize> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut written = 0;
    for experiment in &EXPERIMENTS {
        for run in 0..runs {
            let mut rng = RunRng::for_run(seed, experiment.name, run);
            let mut text = String::new();
            for v in experiment.curve(steps, &mut rng) {
                let _ = writeln!(text, "{}", format_sci(v));
            }
            let path = out_dir.join(format!("{}-{run}.txt", experiment.name));
            std::fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            written += 1;
        }
        info!("Wrote {runs} runs of {}", experiment.name);
    }
    Ok(written)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let written = write_runs(&args.out_dir, args.runs, args.steps, args.seed)?;
    println!(
        "Wrote {written} run files ({} steps each) to {}",
        args.steps,
        args.out_dir.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use runplot::{load_directory, RunPattern};

    #[test]
    fn help_flag_is_not_an_output_directory() {
        let err = Args::try_parse_from(["generate_runs", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn positional_defaults_and_overrides() {
        let args = Args::try_parse_from(["generate_runs"]).unwrap();
        assert_eq!(args.out_dir, PathBuf::from("sample_runs"));
        assert_eq!((args.runs, args.steps, args.seed), (10, 500, 42));

        let args = Args::try_parse_from(["generate_runs", "out", "3", "--seed", "7"]).unwrap();
        assert_eq!(args.out_dir, PathBuf::from("out"));
        assert_eq!((args.runs, args.seed), (3, 7));
        assert!(Args::try_parse_from(["generate_runs", "out", "many"]).is_err());
    }

    #[test]
    fn writes_loadable_sequences() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(write_runs(dir.path(), 3, 25, 1).unwrap(), 6);

        let sets = load_directory(dir.path()).unwrap();
        let names: Vec<&str> = sets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["fast_learner", "slow_learner"]);
        assert!(sets.iter().all(|s| s.len() == 3 && s.runs[0].len() == 25));

        let fast = runplot::load_results(&RunPattern::new(dir.path(), "fast_learner")).unwrap();
        assert_ne!(fast.runs[0], fast.runs[1]);
    }

    #[test]
    fn streams_are_reproducible_per_run() {
        let mut a = RunRng::for_run(42, "fast_learner", 3);
        let mut b = RunRng::for_run(42, "fast_learner", 3);
        let mut c = RunRng::for_run(42, "slow_learner", 3);
        let xa: Vec<u64> = (0..4).map(|_| a.next_u64()).collect();
        let xb: Vec<u64> = (0..4).map(|_| b.next_u64()).collect();
        let xc: Vec<u64> = (0..4).map(|_| c.next_u64()).collect();
        assert_eq!(xa, xb);
        assert_ne!(xa, xc);
    }
}
