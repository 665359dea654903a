//! Deterministic train/test partitioning.

use anyhow::anyhow;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use dataprep_model::{EngineError, Result};

/// Pinned seed so repeated training calls on identical input produce
/// identical partitions and therefore identical coefficients.
pub const SPLIT_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffles `0..n_rows` with a seeded generator and takes
/// `ceil(n_rows * test_size)` rows for the test partition.
///
/// The caller validates `test_size`; a partition with fewer than two
/// rows is a processing error from this step, surfaced as-is.
pub fn train_test_split(n_rows: usize, test_size: f64, seed: u64) -> Result<SplitIndices> {
    let n_test = ((n_rows as f64) * test_size).ceil() as usize;
    let n_train = n_rows.saturating_sub(n_test);
    if n_test < 2 || n_train < 2 {
        return Err(EngineError::processing(
            "train/test split",
            anyhow!("split produced too few rows: {n_train} train, {n_test} test"),
        ));
    }
    let mut indices: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);
    let test = indices[..n_test].to_vec();
    let train = indices[n_test..].to_vec();
    Ok(SplitIndices { train, test })
}
