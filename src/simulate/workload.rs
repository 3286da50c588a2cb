//! Synthetic CPU workloads
//!
//! Closed-form-summable busy loops used to consume wall-clock time. The
//! numeric result carries no meaning; it only exists so the loop cannot be
//! optimized away and so tests can pin the arithmetic exactly.

/// One unit of CPU-bound work, parameterized by its summation range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workload {
    /// `1² + 2² + … + upper²`
    SumOfSquares { upper: u64 },
    /// `1³ + 2³ + … + upper³`
    SumOfCubes { upper: u64 },
}

impl Workload {
    /// Run the workload once and return its sum.
    ///
    /// Wrapping arithmetic so large ranges stay panic-free in debug builds.
    pub fn run(self) -> u64 {
        match self {
            Self::SumOfSquares { upper } => (1..=upper)
                .map(|i| i.wrapping_mul(i))
                .fold(0_u64, u64::wrapping_add),
            Self::SumOfCubes { upper } => (1..=upper)
                .map(|i| i.wrapping_mul(i).wrapping_mul(i))
                .fold(0_u64, u64::wrapping_add),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_of_squares_matches_closed_form() {
        // n(n+1)(2n+1)/6
        let n = 100;
        assert_eq!(
            Workload::SumOfSquares { upper: n }.run(),
            n * (n + 1) * (2 * n + 1) / 6
        );
    }

    #[test]
    fn sum_of_cubes_matches_closed_form() {
        // (n(n+1)/2)²
        let n = 20;
        let triangle = n * (n + 1) / 2;
        assert_eq!(Workload::SumOfCubes { upper: n }.run(), triangle * triangle);
    }

    #[test]
    fn empty_range_sums_to_zero() {
        assert_eq!(Workload::SumOfSquares { upper: 0 }.run(), 0);
        assert_eq!(Workload::SumOfCubes { upper: 0 }.run(), 0);
    }

    #[test]
    fn workload_is_deterministic() {
        let w = Workload::SumOfCubes { upper: 1000 };
        assert_eq!(w.run(), w.run());
    }
}
