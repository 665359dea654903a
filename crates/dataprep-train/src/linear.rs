//! Ordinary least-squares regression via the normal equations.

use anyhow::anyhow;
use ndarray::{Array1, Array2};

use dataprep_model::{EngineError, Result};

/// A fitted linear model: one coefficient per feature plus an intercept.
#[derive(Debug, Clone)]
pub struct LinearModel {
    pub coefficients: Array1<f64>,
    pub intercept: f64,
}

impl LinearModel {
    /// Fits `y ≈ X·w + b` by solving the normal equations over the
    /// intercept-augmented design matrix.
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>) -> Result<Self> {
        let n_rows = x.nrows();
        let n_features = x.ncols();
        // Augmented design matrix [1 | X].
        let mut design = Array2::<f64>::ones((n_rows, n_features + 1));
        for row in 0..n_rows {
            for col in 0..n_features {
                design[[row, col + 1]] = x[[row, col]];
            }
        }
        let gram = design.t().dot(&design);
        let moment = design.t().dot(y);
        let solution = solve_linear_system(&gram, &moment).ok_or_else(|| {
            EngineError::processing("model fit", anyhow!("normal equations are singular"))
        })?;
        let intercept = solution[0];
        let coefficients = solution.slice(ndarray::s![1..]).to_owned();
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        x.dot(&self.coefficients) + self.intercept
    }
}

/// Solves `A·x = b` by Gaussian elimination with partial pivoting.
/// Returns `None` for singular systems. Feature counts here are small,
/// so the dense elimination is plenty.
fn solve_linear_system(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if n != a.ncols() || n != b.len() {
        return None;
    }
    // Augmented matrix [A | b].
    let mut aug = Array2::<f64>::zeros((n, n + 1));
    for i in 0..n {
        for j in 0..n {
            aug[[i, j]] = a[[i, j]];
        }
        aug[[i, n]] = b[i];
    }

    for col in 0..n {
        let mut pivot_row = col;
        for row in col + 1..n {
            if aug[[row, col]].abs() > aug[[pivot_row, col]].abs() {
                pivot_row = row;
            }
        }
        if aug[[pivot_row, col]].abs() < 1e-12 {
            return None;
        }
        if pivot_row != col {
            for j in 0..=n {
                let tmp = aug[[col, j]];
                aug[[col, j]] = aug[[pivot_row, j]];
                aug[[pivot_row, j]] = tmp;
            }
        }
        for row in col + 1..n {
            let factor = aug[[row, col]] / aug[[col, col]];
            for j in col..=n {
                aug[[row, j]] -= factor * aug[[col, j]];
            }
        }
    }

    // Back substitution.
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let mut sum = aug[[i, n]];
        for j in i + 1..n {
            sum -= aug[[i, j]] * x[j];
        }
        x[i] = sum / aug[[i, i]];
    }
    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn recovers_exact_linear_relationship() {
        // y = 3x + 1
        let x = Array2::from_shape_vec((5, 1), vec![0.0, 1.0, 2.0, 3.0, 4.0])
            .expect("design matrix");
        let y = array![1.0, 4.0, 7.0, 10.0, 13.0];
        let model = LinearModel::fit(&x, &y).expect("fit");
        assert!((model.coefficients[0] - 3.0).abs() < 1e-9);
        assert!((model.intercept - 1.0).abs() < 1e-9);
        let predicted = model.predict(&x);
        for (p, t) in predicted.iter().zip(y.iter()) {
            assert!((p - t).abs() < 1e-9);
        }
    }

    #[test]
    fn fits_two_features() {
        // y = 2a - b + 5 over a small grid.
        let mut rows = Vec::new();
        let mut targets = Vec::new();
        for a in 0..4 {
            for b in 0..4 {
                rows.push(a as f64);
                rows.push(b as f64);
                targets.push(2.0 * a as f64 - b as f64 + 5.0);
            }
        }
        let x = Array2::from_shape_vec((16, 2), rows).expect("design matrix");
        let y = Array1::from_vec(targets);
        let model = LinearModel::fit(&x, &y).expect("fit");
        assert!((model.coefficients[0] - 2.0).abs() < 1e-9);
        assert!((model.coefficients[1] + 1.0).abs() < 1e-9);
        assert!((model.intercept - 5.0).abs() < 1e-9);
    }

    #[test]
    fn singular_system_is_processing_error() {
        // Duplicate feature columns make the gram matrix singular.
        let x = Array2::from_shape_vec(
            (4, 2),
            vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0],
        )
        .expect("design matrix");
        let y = array![1.0, 2.0, 3.0, 4.0];
        let error = LinearModel::fit(&x, &y).expect_err("singular");
        assert!(!error.is_validation());
    }
}
