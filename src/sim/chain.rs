//! Same-color chain bonus
//!
//! Bricks are never destroyed by a single hit. The first hit marks a brick as
//! pending; the next hit on a *different* brick of the *same* color destroys
//! both and pays the bonus. Any other hit restarts the chain on the new brick.

use serde::{Deserialize, Serialize};

use super::state::BrickColor;

/// The brick waiting for a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct PendingHit {
    brick_id: u32,
    color: BrickColor,
}

/// What a single brick hit did to the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainOutcome {
    /// Chain was empty; the hit brick is now pending
    Started { brick: u32 },
    /// Pending brick and hit brick match - both must be destroyed
    Completed { first: u32, second: u32 },
    /// Hit did not match; the hit brick replaces the pending one
    Replaced { previous: u32, brick: u32 },
}

/// Chain tracker, reset at every level start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BonusChain {
    pending: Option<PendingHit>,
}

impl BonusChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the brick currently waiting for a partner
    pub fn pending(&self) -> Option<u32> {
        self.pending.map(|p| p.brick_id)
    }

    /// Feed one brick hit into the chain.
    ///
    /// Instance identity (the brick id), not just color, decides a match: the
    /// same brick hit twice never completes a chain.
    pub fn register_hit(&mut self, brick_id: u32, color: BrickColor) -> ChainOutcome {
        let hit = PendingHit { brick_id, color };
        match self.pending {
            None => {
                self.pending = Some(hit);
                ChainOutcome::Started { brick: brick_id }
            }
            Some(prev) if prev.color == color && prev.brick_id != brick_id => {
                self.pending = None;
                ChainOutcome::Completed {
                    first: prev.brick_id,
                    second: brick_id,
                }
            }
            Some(prev) => {
                self.pending = Some(hit);
                ChainOutcome::Replaced {
                    previous: prev.brick_id,
                    brick: brick_id,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_hit_starts_chain() {
        let mut chain = BonusChain::new();
        assert_eq!(
            chain.register_hit(3, BrickColor::Bright),
            ChainOutcome::Started { brick: 3 }
        );
        assert_eq!(chain.pending(), Some(3));
    }

    #[test]
    fn test_same_color_other_brick_completes() {
        let mut chain = BonusChain::new();
        chain.register_hit(0, BrickColor::Medium);
        assert_eq!(
            chain.register_hit(7, BrickColor::Medium),
            ChainOutcome::Completed { first: 0, second: 7 }
        );
        assert_eq!(chain.pending(), None);
    }

    #[test]
    fn test_different_color_replaces_pending() {
        let mut chain = BonusChain::new();
        chain.register_hit(0, BrickColor::Bright);
        assert_eq!(
            chain.register_hit(1, BrickColor::Dark),
            ChainOutcome::Replaced { previous: 0, brick: 1 }
        );
        assert_eq!(chain.pending(), Some(1));
    }

    #[test]
    fn test_same_brick_twice_never_completes() {
        let mut chain = BonusChain::new();
        chain.register_hit(4, BrickColor::Dark);
        assert_eq!(
            chain.register_hit(4, BrickColor::Dark),
            ChainOutcome::Replaced { previous: 4, brick: 4 }
        );
        assert_eq!(chain.pending(), Some(4));
    }

    #[test]
    fn test_chain_after_completion_starts_fresh() {
        let mut chain = BonusChain::new();
        chain.register_hit(0, BrickColor::Bright);
        chain.register_hit(8, BrickColor::Bright);
        assert_eq!(
            chain.register_hit(9, BrickColor::Bright),
            ChainOutcome::Started { brick: 9 }
        );
    }
}
