use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chance that an inserted value is promoted one more layer.
    pub promotion_probability: f64,
    /// Upper bound on promotions per insertion, `None` for unbounded.
    pub max_promotions: Option<usize>,
    /// Fixed seed for the promotion coin; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            promotion_probability: 0.5,
            max_promotions: None,
            seed: None,
        }
    }
}

impl Config {
    pub fn new(promotion_probability: f64) -> Self {
        Config {
            promotion_probability,
            ..Default::default()
        }
    }

    pub fn with_max_promotions(mut self, max_promotions: usize) -> Self {
        self.max_promotions = Some(max_promotions);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        let p = self.promotion_probability;
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "promotion_probability must be in (0, 1), got {}",
                p
            )));
        }

        Ok(())
    }
}
