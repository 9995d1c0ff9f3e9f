use crate::clustering::features::NUMERIC_FEATURE_COUNT;
use serde::{Deserialize, Serialize};

/// Per-column z-score normalization, fit once over a training batch and
/// reused at prediction time — the direct analogue of
/// `sklearn.preprocessing.StandardScaler`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StandardScaler {
    means: [f64; NUMERIC_FEATURE_COUNT],
    /// Population standard deviation per column. A column with zero spread
    /// stores `1.0` here so `transform` divides by one instead of by zero.
    scales: [f64; NUMERIC_FEATURE_COUNT],
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self {
            means: [0.0; NUMERIC_FEATURE_COUNT],
            scales: [1.0; NUMERIC_FEATURE_COUNT],
        }
    }
}

impl StandardScaler {
    pub fn fit<'a>(&mut self, rows: impl Iterator<Item = &'a [f64; NUMERIC_FEATURE_COUNT]> + Clone) {
        let rows_for_count = rows.clone();
        let n = rows_for_count.count();
        if n == 0 {
            *self = Self::default();
            return;
        }

        let mut sums = [0.0; NUMERIC_FEATURE_COUNT];
        for row in rows.clone() {
            for (column, value) in row.iter().enumerate() {
                sums[column] += value;
            }
        }
        let means = sums.map(|sum| sum / n as f64);

        let mut variances = [0.0; NUMERIC_FEATURE_COUNT];
        for row in rows {
            for (column, value) in row.iter().enumerate() {
                let delta = value - means[column];
                variances[column] += delta * delta;
            }
        }
        let scales = variances.map(|variance| {
            let stddev = (variance / n as f64).sqrt();
            if stddev < 1e-12 {
                1.0
            } else {
                stddev
            }
        });

        self.means = means;
        self.scales = scales;
    }

    pub fn transform(&self, row: &[f64; NUMERIC_FEATURE_COUNT]) -> [f64; NUMERIC_FEATURE_COUNT] {
        let mut out = [0.0; NUMERIC_FEATURE_COUNT];
        for column in 0..NUMERIC_FEATURE_COUNT {
            out[column] = (row[column] - self.means[column]) / self.scales[column];
        }
        out
    }

    /// The mean of the per-column standard deviations, used as the default
    /// categorical-mismatch weight `gamma` when fitting a clusterer.
    pub fn mean_scale(&self) -> f64 {
        self.scales.iter().sum::<f64>() / NUMERIC_FEATURE_COUNT as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fitted_columns_have_zero_mean_and_unit_variance() {
        let mut rows = Vec::new();
        for i in 0..20 {
            let mut row = [0.0; NUMERIC_FEATURE_COUNT];
            row[0] = i as f64;
            rows.push(row);
        }
        let mut scaler = StandardScaler::default();
        scaler.fit(rows.iter());
        let transformed: Vec<_> = rows.iter().map(|r| scaler.transform(r)).collect();
        let mean: f64 = transformed.iter().map(|r| r[0]).sum::<f64>() / transformed.len() as f64;
        assert!(mean.abs() < 1e-9);
    }

    #[test]
    fn constant_column_does_not_divide_by_zero() {
        let rows = vec![[5.0; NUMERIC_FEATURE_COUNT]; 10];
        let mut scaler = StandardScaler::default();
        scaler.fit(rows.iter());
        let transformed = scaler.transform(&rows[0]);
        assert!(transformed.iter().all(|v| v.abs() < 1e-9));
    }

    #[test]
    fn fit_on_empty_iterator_resets_to_identity() {
        let mut scaler = StandardScaler::default();
        scaler.fit(std::iter::empty());
        let row = [3.0; NUMERIC_FEATURE_COUNT];
        assert_eq!(scaler.transform(&row), row);
    }
}
