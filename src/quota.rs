//! Difficulty-ratio planning for subject slices.

use serde::{Deserialize, Serialize};

use crate::bank::Difficulty;
use crate::constants::assembly::{DEFAULT_HIGH_RATIO, DEFAULT_LOW_RATIO, DEFAULT_MEDIUM_RATIO};
use crate::errors::AssemblyError;

/// Target difficulty mix for one subject slice.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DifficultyRatios {
    /// Fraction targeted at low difficulty.
    pub low: f64,
    /// Fraction targeted at medium difficulty.
    pub medium: f64,
    /// Fraction targeted at high difficulty.
    pub high: f64,
}

impl Default for DifficultyRatios {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW_RATIO,
            medium: DEFAULT_MEDIUM_RATIO,
            high: DEFAULT_HIGH_RATIO,
        }
    }
}

impl DifficultyRatios {
    /// Validate that each fraction is finite and within `[0, 1]`.
    ///
    /// The fractions need not sum to 1; rounding drift is absorbed by the
    /// high bucket when quotas are planned.
    pub fn validated(self) -> Result<Self, AssemblyError> {
        let components = [
            ("low", self.low),
            ("medium", self.medium),
            ("high", self.high),
        ];
        for (label, value) in components {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(AssemblyError::Configuration(format!(
                    "difficulty ratio '{label}' must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(self)
    }
}

/// Exact per-difficulty slot counts for one subject slice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubjectQuota {
    /// Low-difficulty slots.
    pub low: usize,
    /// Medium-difficulty slots.
    pub medium: usize,
    /// High-difficulty slots.
    pub high: usize,
}

impl SubjectQuota {
    /// Total slots across buckets; always equals the planned slice size.
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }

    /// Planned slots for one difficulty bucket.
    pub fn target(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Low => self.low,
            Difficulty::Medium => self.medium,
            Difficulty::High => self.high,
        }
    }
}

/// Plan per-difficulty slot counts for a slice of `slice_size` questions.
///
/// Low and medium round half away from zero; the high bucket absorbs the
/// rounding error so the three counts always sum to exactly `slice_size`.
/// The clamps only engage for ratio tables whose rounded low + medium would
/// overshoot the slice; ordinary tables take the plain rounded path.
pub fn plan_quotas(slice_size: usize, ratios: DifficultyRatios) -> SubjectQuota {
    let low = round_count(slice_size, ratios.low).min(slice_size);
    let medium = round_count(slice_size, ratios.medium).min(slice_size - low);
    let high = slice_size - low - medium;
    SubjectQuota { low, medium, high }
}

fn round_count(slice_size: usize, ratio: f64) -> usize {
    (slice_size as f64 * ratio).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ratios_plan_one_three_one_for_slice_of_five() {
        let quota = plan_quotas(5, DifficultyRatios::default());
        assert_eq!(
            quota,
            SubjectQuota {
                low: 1,
                medium: 3,
                high: 1
            }
        );
    }

    #[test]
    fn quotas_sum_exactly_for_all_slices_up_to_one_hundred() {
        let tables = [
            DifficultyRatios::default(),
            DifficultyRatios {
                low: 0.33,
                medium: 0.33,
                high: 0.34,
            },
            DifficultyRatios {
                low: 0.6,
                medium: 0.6,
                high: 0.6,
            },
            DifficultyRatios {
                low: 0.0,
                medium: 0.0,
                high: 0.0,
            },
            DifficultyRatios {
                low: 1.0,
                medium: 1.0,
                high: 1.0,
            },
        ];
        for ratios in tables {
            for slice_size in 0..=100 {
                let quota = plan_quotas(slice_size, ratios);
                assert_eq!(
                    quota.total(),
                    slice_size,
                    "slice {slice_size} with ratios {ratios:?}"
                );
            }
        }
    }

    #[test]
    fn high_bucket_absorbs_rounding_drift() {
        let ratios = DifficultyRatios {
            low: 0.25,
            medium: 0.55,
            high: 0.2,
        };
        let quota = plan_quotas(10, ratios);
        assert_eq!(quota.low, 3);
        assert_eq!(quota.medium, 6);
        assert_eq!(quota.high, 1);
    }

    #[test]
    fn target_reads_the_matching_bucket() {
        let quota = plan_quotas(5, DifficultyRatios::default());
        assert_eq!(quota.target(Difficulty::Low), 1);
        assert_eq!(quota.target(Difficulty::Medium), 3);
        assert_eq!(quota.target(Difficulty::High), 1);
    }

    #[test]
    fn validated_rejects_out_of_range_fractions() {
        let too_big = DifficultyRatios {
            low: 1.5,
            ..DifficultyRatios::default()
        };
        assert!(too_big.validated().is_err());

        let negative = DifficultyRatios {
            medium: -0.1,
            ..DifficultyRatios::default()
        };
        assert!(negative.validated().is_err());

        let non_finite = DifficultyRatios {
            high: f64::NAN,
            ..DifficultyRatios::default()
        };
        assert!(non_finite.validated().is_err());
    }
}
