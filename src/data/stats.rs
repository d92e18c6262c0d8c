use super::model::{RunSet, Summary};
use crate::error::DataError;

/// Per-step mean, standard error, and standard error of the running total.
///
/// Standard deviations use divisor N (population), then are scaled by
/// `1/sqrt(N)`. All runs must have the same length.
pub fn aggregate_results(runs: &[Vec<f64>]) -> Result<(Vec<f64>, Vec<f64>, Vec<f64>), DataError> {
    let first = runs.first().ok_or(DataError::NoRuns)?;
    let steps = first.len();
    if let Some((run, bad)) = runs.iter().enumerate().find(|(_, r)| r.len() != steps) {
        return Err(DataError::LengthMismatch {
            run,
            expected: steps,
            found: bad.len(),
        });
    }

    let n = runs.len() as f64;
    let sqrt_n = n.sqrt();

    let mut mean = Vec::with_capacity(steps);
    let mut stderr = Vec::with_capacity(steps);
    let mut cumulative_stderr = Vec::with_capacity(steps);

    // Running totals, one per run.
    let mut totals = vec![0.0; runs.len()];
    let mut column = vec![0.0; runs.len()];

    for t in 0..steps {
        for (i, run) in runs.iter().enumerate() {
            column[i] = run[t];
            totals[i] += run[t];
        }
        let (m, sd) = mean_std(&column);
        let (_, cum_sd) = mean_std(&totals);
        mean.push(m);
        stderr.push(sd / sqrt_n);
        cumulative_stderr.push(cum_sd / sqrt_n);
    }

    Ok((mean, stderr, cumulative_stderr))
}

/// Aggregate a loaded run set into a [`Summary`].
pub fn summarize(set: &RunSet) -> Result<Summary, DataError> {
    let (mean, stderr, cumulative_stderr) = aggregate_results(&set.runs)?;
    Ok(Summary {
        name: set.name.clone(),
        runs: set.len(),
        mean,
        stderr,
        cumulative_stderr,
    })
}

/// Mean and population standard deviation of a non-empty slice.
fn mean_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn close(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < EPS)
    }

    #[test]
    fn identical_runs_have_zero_stderr() {
        let row = vec![0.5, -1.0, 3.25, 7.0];
        let runs = vec![row.clone(); 5];
        let (mean, stderr, cum) = aggregate_results(&runs).unwrap();
        assert!(close(&mean, &row));
        assert!(stderr.iter().all(|&s| s.abs() < EPS));
        assert!(cum.iter().all(|&s| s.abs() < EPS));
    }

    #[test]
    fn known_values() {
        let runs = vec![vec![1.0, 3.0], vec![3.0, 5.0]];
        let (mean, stderr, cum) = aggregate_results(&runs).unwrap();
        let r2 = 2f64.sqrt();
        assert!(close(&mean, &[2.0, 4.0]));
        assert!(close(&stderr, &[1.0 / r2, 1.0 / r2]));
        // running totals: [1, 4] and [3, 8]
        assert!(close(&cum, &[1.0 / r2, 2.0 / r2]));
    }

    #[test]
    fn invariant_under_run_permutation() {
        let runs = vec![
            vec![1.0, 9.0, 2.0],
            vec![4.0, -3.0, 0.5],
            vec![2.5, 6.0, 8.0],
        ];
        let mut permuted = runs.clone();
        permuted.rotate_left(1);
        permuted.swap(0, 1);

        let a = aggregate_results(&runs).unwrap();
        let b = aggregate_results(&permuted).unwrap();
        assert!(close(&a.0, &b.0));
        assert!(close(&a.1, &b.1));
        assert!(close(&a.2, &b.2));
    }

    #[test]
    fn single_run_has_zero_stderr() {
        let (mean, stderr, _) = aggregate_results(&[vec![2.0, 4.0]]).unwrap();
        assert!(close(&mean, &[2.0, 4.0]));
        assert!(close(&stderr, &[0.0, 0.0]));
    }

    #[test]
    fn empty_and_ragged_inputs_fail() {
        assert!(matches!(aggregate_results(&[]), Err(DataError::NoRuns)));
        assert!(matches!(
            aggregate_results(&[vec![1.0, 2.0], vec![1.0]]),
            Err(DataError::LengthMismatch { run: 1, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn summarize_keeps_name_and_count() {
        let set = RunSet {
            name: "lander".into(),
            runs: vec![vec![1.0], vec![3.0]],
        };
        let s = summarize(&set).unwrap();
        assert_eq!(s.name, "lander");
        assert_eq!(s.runs, 2);
        assert!(close(&s.mean, &[2.0]));
    }
}
