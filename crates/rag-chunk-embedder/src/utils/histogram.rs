use std::fmt;

const BAR_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: usize,
    /// Exclusive, except for the last bin
    pub upper: usize,
    pub count: usize,
}

/// Equal-width histogram of per-row token counts.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenHistogram {
    bins: Vec<HistogramBin>,
    total: usize,
}

impl TokenHistogram {
    pub fn from_counts(counts: &[usize], bins: usize) -> Self {
        let bins = bins.max(1);
        let (Some(&min), Some(&max)) = (counts.iter().min(), counts.iter().max()) else {
            return Self {
                bins: Vec::new(),
                total: 0,
            };
        };

        // ceil((max - min + 1) / bins), at least one token wide
        let width = (max - min + bins) / bins;

        let mut result: Vec<HistogramBin> = (0..bins)
            .map(|i| HistogramBin {
                lower: min + i * width,
                upper: min + (i + 1) * width,
                count: 0,
            })
            .collect();

        for &count in counts {
            let idx = ((count - min) / width).min(bins - 1);
            result[idx].count += 1;
        }

        Self {
            bins: result,
            total: counts.len(),
        }
    }

    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl fmt::Display for TokenHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let peak = self.bins.iter().map(|b| b.count).max().unwrap_or(0);

        for bin in &self.bins {
            let len = if peak == 0 {
                0
            } else {
                (bin.count * BAR_WIDTH).div_ceil(peak)
            };
            writeln!(
                f,
                "{:>7}-{:<7} | {:<width$} {}",
                bin.lower,
                bin.upper,
                "#".repeat(len),
                bin.count,
                width = BAR_WIDTH
            )?;
        }

        Ok(())
    }
}
