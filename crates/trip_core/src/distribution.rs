//! Five-number summaries for box-plot charts.

use serde::Serialize;

use crate::stats::Column;

/// Minimum, quartiles and maximum of a column's finite values.
///
/// Quartiles interpolate linearly between ranks, so `median` matches
/// [`Column::median`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl BoxStats {
    /// `None` when the column has no finite values.
    pub fn from_column(column: &Column) -> Option<Self> {
        Some(Self {
            min: column.min()?,
            q1: column.quantile(0.25)?,
            median: column.quantile(0.5)?,
            q3: column.quantile(0.75)?,
            max: column.max()?,
        })
    }

    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_column(&Column::from_values(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartiles_of_five_values() {
        let stats = BoxStats::from_values(vec![50.0, 10.0, 40.0, 20.0, 30.0]).unwrap();
        assert_eq!(
            stats,
            BoxStats {
                min: 10.0,
                q1: 20.0,
                median: 30.0,
                q3: 40.0,
                max: 50.0,
            }
        );
    }

    #[test]
    fn single_value_collapses_the_box() {
        let stats = BoxStats::from_values(vec![7.5]).unwrap();
        assert_eq!(stats.min, 7.5);
        assert_eq!(stats.q1, 7.5);
        assert_eq!(stats.q3, 7.5);
        assert_eq!(stats.max, 7.5);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        let stats = BoxStats::from_values(vec![f64::NAN, 1.0, 3.0]).unwrap();
        assert_eq!(stats.median, 2.0);
        assert!(BoxStats::from_values(vec![f64::NAN]).is_none());
    }
}
