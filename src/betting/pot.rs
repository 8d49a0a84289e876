//! Shared token pot.
//!
//! Forfeited bets are collected here. The pot is a display aggregate: no
//! rule pays it out, so it only grows.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePot {
    total: u32,
}

impl GamePot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Add forfeited tokens.
    pub fn collect(&mut self, tokens: u32) {
        self.total += tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect() {
        let mut pot = GamePot::new();
        pot.collect(2);
        pot.collect(0);
        pot.collect(3);
        assert_eq!(pot.total(), 5);
    }
}
