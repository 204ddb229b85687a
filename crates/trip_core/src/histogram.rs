//! Equal-width histograms for distribution charts.

use serde::Serialize;

use crate::stats::Column;

/// Bin count used by the scenario distribution charts.
pub const DEFAULT_BINS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<Bin>,
    /// Values left out because they were missing or not finite.
    pub excluded: usize,
}

impl Histogram {
    /// Bins the finite values of `column` over `[min, max]`.
    ///
    /// Returns `None` when there is nothing to bin. When every value is equal
    /// a single bin holds them all.
    pub fn from_column(column: &Column, bins: usize) -> Option<Self> {
        let (min, max) = (column.min()?, column.max()?);
        if bins == 0 {
            return None;
        }

        if min == max {
            return Some(Self {
                bins: vec![Bin {
                    lower: min,
                    upper: max,
                    count: column.len(),
                }],
                excluded: column.excluded(),
            });
        }

        let width = (max - min) / bins as f64;
        let mut histogram: Vec<Bin> = (0..bins)
            .map(|i| Bin {
                lower: min + width * i as f64,
                upper: if i + 1 == bins {
                    max
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for &value in column.values() {
            let idx = (((value - min) / width) as usize).min(bins - 1);
            histogram[idx].count += 1;
        }

        Some(Self {
            bins: histogram,
            excluded: column.excluded(),
        })
    }

    pub fn from_optional<I>(values: I, bins: usize) -> Option<Self>
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        Self::from_column(&Column::from_optional(values), bins)
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}
