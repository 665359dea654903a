//! Linear regression training over tabular datasets: a deterministic
//! seeded split, an OLS fit on selected feature columns, and evaluation
//! metrics over the held-out partition.

pub mod linear;
pub mod metrics;
pub mod split;
pub mod trainer;

pub use linear::LinearModel;
pub use split::{SPLIT_SEED, SplitIndices, train_test_split};
pub use trainer::{ModelResult, ModelTrainer};
