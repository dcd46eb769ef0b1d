use std::fmt;

/// Dense ranks over one metric, descending. Entries with a value of zero
/// (or less) are unranked and get rank 0. Ties share a rank and the next
/// distinct value takes the next rank: [100, 100, 50, 0] -> [1, 1, 2, 0].
pub fn dense_ranks(values: &[f64]) -> Vec<u32> {
    let mut distinct: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    distinct.sort_by(|a, b| b.total_cmp(a));
    distinct.dedup();

    values
        .iter()
        .map(|v| {
            if *v > 0.0 {
                // Every positive value is present in the distinct list, so
                // the partition point lands exactly on it.
                let position = distinct.partition_point(|d| d.total_cmp(v).is_gt());
                position as u32 + 1
            } else {
                0
            }
        })
        .collect()
}

/// Where a rank falls inside the ranked population. Below the top half
/// the raw percentile is carried through instead of a fixed label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBand {
    Top10,
    Top25,
    Top50,
    Top(u32),
}

impl RankBand {
    /// `rank` is 1-based within a population of `total` ranked entities.
    /// Rank 0 (unranked) has no band.
    pub fn from_position(rank: u32, total: usize) -> Option<RankBand> {
        if rank == 0 || total == 0 {
            return None;
        }
        let percentile = (1.0 - rank as f64 / total as f64) * 100.0;
        let band = if percentile >= 90.0 {
            RankBand::Top10
        } else if percentile >= 75.0 {
            RankBand::Top25
        } else if percentile >= 50.0 {
            RankBand::Top50
        } else {
            RankBand::Top(percentile.round() as u32)
        };
        Some(band)
    }
}

impl fmt::Display for RankBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankBand::Top10 => write!(f, "Top 10%"),
            RankBand::Top25 => write!(f, "Top 25%"),
            RankBand::Top50 => write!(f, "Top 50%"),
            RankBand::Top(percentile) => write!(f, "Top {percentile}%"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_share_a_rank_and_zeros_are_unranked() {
        assert_eq!(dense_ranks(&[100.0, 100.0, 50.0, 0.0]), vec![1, 1, 2, 0]);
    }

    #[test]
    fn next_distinct_value_takes_the_next_rank() {
        assert_eq!(
            dense_ranks(&[10.0, 30.0, 30.0, 30.0, 5.0]),
            vec![2, 1, 1, 1, 3]
        );
    }

    #[test]
    fn scattered_duplicates_rank_consistently() {
        assert_eq!(
            dense_ranks(&[7.0, 1.0, 9.0, 7.0, 0.0, 3.0, 9.0, 1.0]),
            vec![2, 4, 1, 2, 0, 3, 1, 4]
        );
    }

    #[test]
    fn all_zero_input_yields_all_unranked() {
        assert_eq!(dense_ranks(&[0.0, 0.0]), vec![0, 0]);
        assert_eq!(dense_ranks(&[]), Vec::<u32>::new());
    }

    #[test]
    fn bands_follow_the_rank_percentile() {
        assert_eq!(RankBand::from_position(1, 100), Some(RankBand::Top10));
        assert_eq!(RankBand::from_position(10, 100), Some(RankBand::Top10));
        assert_eq!(RankBand::from_position(11, 100), Some(RankBand::Top25));
        assert_eq!(RankBand::from_position(25, 100), Some(RankBand::Top25));
        assert_eq!(RankBand::from_position(50, 100), Some(RankBand::Top50));
        assert_eq!(RankBand::from_position(0, 100), None);
    }

    #[test]
    fn bottom_half_keeps_the_raw_percentile() {
        assert_eq!(RankBand::from_position(51, 100), Some(RankBand::Top(49)));
        assert_eq!(RankBand::from_position(100, 100), Some(RankBand::Top(0)));
        assert_eq!(
            RankBand::from_position(51, 100).map(|b| b.to_string()),
            Some("Top 49%".to_string())
        );
    }
}
