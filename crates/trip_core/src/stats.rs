//! Descriptive statistics over one numeric column.

/// Finite values of a column, sorted ascending, plus how many inputs were
/// left out because they were missing or not finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    sorted: Vec<f64>,
    excluded: usize,
}

impl Column {
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_optional(values.into_iter().map(Some))
    }

    /// Builds a column, excluding `None`, `NaN` and infinite entries.
    pub fn from_optional<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let mut sorted = Vec::new();
        let mut excluded = 0;
        for value in values {
            match value {
                Some(v) if v.is_finite() => sorted.push(v),
                _ => excluded += 1,
            }
        }
        sorted.sort_by(f64::total_cmp);
        Self { sorted, excluded }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Number of inputs left out of every statistic.
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    pub fn values(&self) -> &[f64] {
        &self.sorted
    }

    pub fn mean(&self) -> Option<f64> {
        if self.sorted.is_empty() {
            return None;
        }
        Some(self.sorted.iter().sum::<f64>() / self.sorted.len() as f64)
    }

    /// Middle order statistic; the two central values are averaged for even counts.
    pub fn median(&self) -> Option<f64> {
        let n = self.sorted.len();
        if n == 0 {
            return None;
        }
        if n % 2 == 0 {
            Some((self.sorted[n / 2 - 1] + self.sorted[n / 2]) / 2.0)
        } else {
            Some(self.sorted[n / 2])
        }
    }

    /// Nearest-rank percentile at index `floor(q * (n - 1))`.
    pub fn percentile(&self, q: f64) -> Option<f64> {
        let n = self.sorted.len();
        if n == 0 {
            return None;
        }
        let idx = ((n - 1) as f64 * q.clamp(0.0, 1.0)) as usize;
        Some(self.sorted[idx.min(n - 1)])
    }

    /// Quantile with linear interpolation between the two closest ranks.
    pub fn quantile(&self, q: f64) -> Option<f64> {
        let n = self.sorted.len();
        if n == 0 {
            return None;
        }
        let position = (n - 1) as f64 * q.clamp(0.0, 1.0);
        let lower = position.floor() as usize;
        let upper = position.ceil() as usize;
        let fraction = position - lower as f64;
        Some(self.sorted[lower] + (self.sorted[upper] - self.sorted[lower]) * fraction)
    }

    pub fn min(&self) -> Option<f64> {
        self.sorted.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.sorted.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_stats() {
        let column = Column::from_values((1..=10).map(|v| v as f64 * 10.0));
        assert_eq!(column.mean(), Some(55.0));
        // Median of 10 values: average of 5th (50) and 6th (60) = 55.0
        assert_eq!(column.median(), Some(55.0));
        // P90: floor(0.9 * 9) = index 8, which is 90
        assert_eq!(column.percentile(0.9), Some(90.0));
        assert_eq!(column.min(), Some(10.0));
        assert_eq!(column.max(), Some(100.0));
    }

    #[test]
    fn test_calculate_stats_empty() {
        let column = Column::from_values(Vec::new());
        assert_eq!(column.mean(), None);
        assert_eq!(column.median(), None);
        assert_eq!(column.percentile(0.9), None);
        assert_eq!(column.max(), None);
    }

    #[test]
    fn quantile_interpolates_between_ranks() {
        let column = Column::from_values(vec![4.0, 1.0, 3.0, 2.0]);
        assert_eq!(column.quantile(0.0), Some(1.0));
        assert_eq!(column.quantile(0.25), Some(1.75));
        assert_eq!(column.quantile(0.5), column.median());
        assert_eq!(column.quantile(0.75), Some(3.25));
        assert_eq!(column.quantile(1.0), Some(4.0));
        assert_eq!(Column::default().quantile(0.5), None);
    }

    #[test]
    fn odd_count_median_is_middle_value() {
        let column = Column::from_values(vec![3.0, 1.0, 2.0]);
        assert_eq!(column.median(), Some(2.0));
    }

    #[test]
    fn missing_and_non_finite_values_are_counted_not_used() {
        let column = Column::from_optional(vec![
            Some(2.0),
            None,
            Some(f64::NAN),
            Some(f64::INFINITY),
            Some(4.0),
        ]);
        assert_eq!(column.len(), 2);
        assert_eq!(column.excluded(), 3);
        assert_eq!(column.mean(), Some(3.0));
    }
}
