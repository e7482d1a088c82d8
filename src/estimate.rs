//! Placeholder values for providers that omit nutrition or review data.
//!
//! These numbers are generated, not reported by any source, and should not be
//! shown as authoritative.

use rand::Rng;

/// Source of placeholder calories, ratings and review counts
pub trait Estimator: Send + Sync {
    /// Calories per serving, in `[200, 500)`
    fn calories(&self) -> u32;

    /// Star rating, in `[4.0, 5.0)`
    fn rating(&self) -> f64;

    /// Review count, in `[50, 550)`
    fn review_count(&self) -> u32;
}

/// Draws estimates from the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomEstimator;

impl Estimator for RandomEstimator {
    fn calories(&self) -> u32 {
        rand::thread_rng().gen_range(200..500)
    }

    fn rating(&self) -> f64 {
        rand::thread_rng().gen_range(4.0..5.0)
    }

    fn review_count(&self) -> u32 {
        rand::thread_rng().gen_range(50..550)
    }
}

/// Always returns the same estimates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedEstimator {
    pub calories: u32,
    pub rating: f64,
    pub review_count: u32,
}

impl Default for FixedEstimator {
    fn default() -> Self {
        Self {
            calories: 350,
            rating: 4.5,
            review_count: 100,
        }
    }
}

impl Estimator for FixedEstimator {
    fn calories(&self) -> u32 {
        self.calories
    }

    fn rating(&self) -> f64 {
        self.rating
    }

    fn review_count(&self) -> u32 {
        self.review_count
    }
}
