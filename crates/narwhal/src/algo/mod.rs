pub mod grid3d;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct GridLayoutOptions {
    /// Seed for deterministic randomness. Random placement draws from a seeded xorshift64*
    /// generator rather than a global source, so identical inputs produce identical layouts.
    pub random_seed: u64,
    /// Lattice side is `grid_oversize * ceil(cbrt(n))`. Values above 1 leave free cells for the
    /// exhaustive re-placement pass to move into.
    pub grid_oversize: usize,
    /// Depth bound for the hop-distance search. This is the only thing stopping recursion on
    /// cyclic graphs.
    pub max_hops: u32,
    pub perturbation_start: f64,
    pub perturbation_step: f64,
    pub weights: WeightTable,
    /// Random draws allowed per placement before failing with `Error::Capacity`.
    pub max_placement_attempts: usize,
}

impl Default for GridLayoutOptions {
    fn default() -> Self {
        Self {
            random_seed: 0,
            grid_oversize: 2,
            max_hops: 4,
            perturbation_start: 0.6,
            perturbation_step: 0.05,
            weights: WeightTable::default(),
            max_placement_attempts: 10_000,
        }
    }
}

impl GridLayoutOptions {
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidOptions { message });

        if self.grid_oversize == 0 {
            return invalid("grid_oversize must be at least 1".to_string());
        }
        if !(1..=16).contains(&self.max_hops) {
            return invalid(format!("max_hops must be in 1..=16, got {}", self.max_hops));
        }
        let start = self.perturbation_start;
        if !(start.is_finite() && start > 0.0 && start < 1.0) {
            return invalid(format!(
                "perturbation_start must be in (0, 1), got {start}"
            ));
        }
        let step = self.perturbation_step;
        if !(step.is_finite() && step > 0.0) {
            return invalid(format!("perturbation_step must be positive, got {step}"));
        }
        if self.max_placement_attempts == 0 {
            return invalid("max_placement_attempts must be at least 1".to_string());
        }
        self.weights.validate()
    }

    /// Perturbation fraction for each round, derived from an integer round counter.
    ///
    /// With the defaults this is exactly `0.60, 0.55, ..., 0.05`.
    pub fn perturbation_schedule(&self) -> Vec<f64> {
        let eps = self.perturbation_step * 1e-6;
        (0..)
            .map(|k| self.perturbation_start - (k as f64) * self.perturbation_step)
            .take_while(|&p| p > eps)
            .collect()
    }
}

/// Pairwise weight by hop distance. Negative weights attract, positive weights repel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightTable {
    pub direct: f64,
    pub two_hops: f64,
    pub three_hops: f64,
    pub four_hops: f64,
    /// No path within the hop bound, or a path longer than four hops.
    pub unreachable: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            direct: -1.0,
            two_hops: 0.0001,
            three_hops: 0.001,
            four_hops: 0.01,
            unreachable: 0.1,
        }
    }
}

impl WeightTable {
    pub fn weight_for(&self, hops: Option<u32>) -> f64 {
        match hops {
            Some(1) => self.direct,
            Some(2) => self.two_hops,
            Some(3) => self.three_hops,
            Some(4) => self.four_hops,
            _ => self.unreachable,
        }
    }

    fn validate(&self) -> Result<()> {
        let all = [
            self.direct,
            self.two_hops,
            self.three_hops,
            self.four_hops,
            self.unreachable,
        ];
        if all.iter().all(|w| w.is_finite()) {
            Ok(())
        } else {
            Err(Error::InvalidOptions {
                message: format!("weights must be finite, got {self:?}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_has_twelve_rounds() {
        let schedule = GridLayoutOptions::default().perturbation_schedule();
        assert_eq!(schedule.len(), 12);
        assert!((schedule[0] - 0.6).abs() < 1e-12);
        assert!((schedule[11] - 0.05).abs() < 1e-12);
        for w in schedule.windows(2) {
            assert!((w[0] - w[1] - 0.05).abs() < 1e-12);
        }
    }

    #[test]
    fn weight_table_defaults() {
        let w = WeightTable::default();
        assert_eq!(w.weight_for(Some(1)), -1.0);
        assert_eq!(w.weight_for(Some(2)), 0.0001);
        assert_eq!(w.weight_for(Some(3)), 0.001);
        assert_eq!(w.weight_for(Some(4)), 0.01);
        assert_eq!(w.weight_for(Some(5)), 0.1);
        assert_eq!(w.weight_for(None), 0.1);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let cases = [
            GridLayoutOptions {
                grid_oversize: 0,
                ..Default::default()
            },
            GridLayoutOptions {
                max_hops: 0,
                ..Default::default()
            },
            GridLayoutOptions {
                perturbation_start: 1.0,
                ..Default::default()
            },
            GridLayoutOptions {
                perturbation_step: 0.0,
                ..Default::default()
            },
            GridLayoutOptions {
                max_placement_attempts: 0,
                ..Default::default()
            },
            GridLayoutOptions {
                weights: WeightTable {
                    unreachable: f64::NAN,
                    ..Default::default()
                },
                ..Default::default()
            },
        ];
        for opts in cases {
            assert!(
                matches!(opts.validate(), Err(Error::InvalidOptions { .. })),
                "expected rejection for {opts:?}"
            );
        }
        assert!(GridLayoutOptions::default().validate().is_ok());
    }
}
