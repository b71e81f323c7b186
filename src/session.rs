//! Campaign session
//!
//! The one piece of state that outlives a round is campaign progress. A
//! scene reload tears the round down and rebuilds it; the level counter
//! survives here, threaded into each new round, instead of living in
//! process-global state. It resets only when the process does.

use crate::config::Config;
use crate::sim::GameRound;

/// Campaign progress across round reloads
#[derive(Debug, Clone)]
pub struct Campaign {
    config: Config,
    level: u32,
}

impl Campaign {
    pub fn new(config: Config) -> Self {
        Self { config, level: 1 }
    }

    /// Current level, 1-based
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_final_level(&self) -> bool {
        self.level >= self.config.num_levels
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build a fresh round at the current level. Everything but the level
    /// counter starts from scratch.
    pub fn start_round(&self, seed: u64) -> GameRound {
        GameRound::new(&self.config, self.level, seed)
    }

    /// Bump the persisted level counter. The host calls this when the round
    /// requests a reload, before starting the next round.
    pub fn advance_level(&mut self) {
        self.level += 1;
        log::info!("campaign advanced to level {}", self.level);
    }
}
