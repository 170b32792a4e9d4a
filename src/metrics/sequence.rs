//! Scalar statistics of a recorded Collatz sequence
//!
//! The sequence is the `value` column of a path log: the seed first, then
//! one value per transition.

/// Per-seed statistics derived from the value sequence alone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceStats {
    /// Transitions recorded (sequence length minus one)
    pub total_steps: usize,
    /// First index ≥ 1 whose value is below the seed
    pub stopping_time: Option<usize>,
    pub max_value: u64,
    /// Number of odd entries, the seed included
    pub odd_steps: usize,
    /// Longest run of consecutive odd entries
    pub max_consecutive_odds: usize,
    pub sum_of_values: f64,
    /// max_value / seed
    pub peak_ratio: f64,
}

impl SequenceStats {
    pub fn from_values(seed: u64, values: &[u64]) -> Self {
        let total_steps = values.len().saturating_sub(1);

        let stopping_time = values
            .iter()
            .enumerate()
            .skip(1)
            .find(|&(_, &v)| v < seed)
            .map(|(idx, _)| idx);

        let max_value = values.iter().copied().max().unwrap_or(0);

        let odd_steps = values.iter().filter(|&&v| v % 2 == 1).count();

        let mut max_consecutive_odds = 0usize;
        let mut run = 0usize;
        for &v in values {
            if v % 2 == 1 {
                run += 1;
                max_consecutive_odds = max_consecutive_odds.max(run);
            } else {
                run = 0;
            }
        }

        // exact integer sum, rounded once
        let sum_of_values = values.iter().map(|&v| u128::from(v)).sum::<u128>() as f64;

        let peak_ratio = if seed != 0 {
            max_value as f64 / seed as f64
        } else {
            0.0
        };

        Self {
            total_steps,
            stopping_time,
            max_value,
            odd_steps,
            max_consecutive_odds,
            sum_of_values,
            peak_ratio,
        }
    }
}
