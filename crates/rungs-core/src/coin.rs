use rand::prelude::*;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::error::{Error, Result};

/// Decides, one step at a time, whether a freshly inserted value climbs one
/// more layer.
///
/// The list calls `flip` once per potential promotion and acts on the answer
/// immediately. Any `FnMut() -> bool` closure is a coin.
pub trait Coin {
    fn flip(&mut self) -> bool;
}

impl<F: FnMut() -> bool> Coin for F {
    fn flip(&mut self) -> bool {
        self()
    }
}

/// A biased coin which lands on "promote" with probability `p`.
///
/// Repeated flips give a geometric layer distribution: a value reaches layer
/// `n` with probability `p^n`.
#[derive(Debug, Clone)]
pub struct RandomCoin {
    p: f64,
    rng: SmallRng,
}

impl RandomCoin {
    /// Create a coin seeded from system entropy.
    ///
    /// `p` must lie in the open interval `(0, 1)`.
    pub fn new(p: f64) -> Result<Self> {
        Self::check(p)?;
        Ok(RandomCoin {
            p,
            rng: SmallRng::from_entropy(),
        })
    }

    /// Create a deterministic coin; the same seed replays the same flips.
    pub fn seeded(p: f64, seed: u64) -> Result<Self> {
        Self::check(p)?;
        Ok(RandomCoin {
            p,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;
        match config.seed {
            Some(seed) => Self::seeded(config.promotion_probability, seed),
            None => Self::new(config.promotion_probability),
        }
    }

    pub fn probability(&self) -> f64 {
        self.p
    }

    fn check(p: f64) -> Result<()> {
        if p > 0.0 && p < 1.0 {
            Ok(())
        } else {
            Err(Error::InvalidConfig(format!("coin probability must be in (0, 1), got {}", p)))
        }
    }
}

impl Default for RandomCoin {
    fn default() -> Self {
        RandomCoin {
            p: 0.5,
            rng: SmallRng::from_entropy(),
        }
    }
}

impl Coin for RandomCoin {
    fn flip(&mut self) -> bool {
        self.rng.gen_bool(self.p)
    }
}

/// Always promotes. Only terminates when paired with a promotion cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysPromote;

impl Coin for AlwaysPromote {
    fn flip(&mut self) -> bool {
        true
    }
}

/// Never promotes; the list degenerates to a single sorted linked list.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverPromote;

impl Coin for NeverPromote {
    fn flip(&mut self) -> bool {
        false
    }
}
