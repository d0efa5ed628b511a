//! Swipe allowance for the player-card feed
//!
//! Each swipe consumes one from the allowance; more are bought with coins.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wallet::{WalletError, WalletService};

pub const DEFAULT_SWIPES: u32 = 5;
/// Coins per purchase
pub const SWIPE_COST: u64 = 100;
pub const SWIPES_PER_PURCHASE: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SwipeError {
    #[error("no swipes left")]
    NoneLeft,
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwipeCounter {
    remaining: u32,
}

impl Default for SwipeCounter {
    fn default() -> Self {
        Self {
            remaining: DEFAULT_SWIPES,
        }
    }
}

impl SwipeCounter {
    pub fn new(remaining: u32) -> Self {
        Self { remaining }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn use_swipe(&mut self) -> Result<u32, SwipeError> {
        if self.remaining == 0 {
            return Err(SwipeError::NoneLeft);
        }
        self.remaining -= 1;
        Ok(self.remaining)
    }

    /// Spend [`SWIPE_COST`] coins for [`SWIPES_PER_PURCHASE`] more swipes
    pub fn buy_swipes(&mut self, wallet: &mut dyn WalletService) -> Result<u32, SwipeError> {
        wallet.spend(SWIPE_COST, "swipes")?;
        self.remaining = self.remaining.saturating_add(SWIPES_PER_PURCHASE);
        log::info!("bought {} swipes, {} left", SWIPES_PER_PURCHASE, self.remaining);
        Ok(self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserId;
    use crate::wallet::InMemoryWallet;

    #[test]
    fn test_use_until_empty() {
        let mut swipes = SwipeCounter::default();
        for left in (0..DEFAULT_SWIPES).rev() {
            assert_eq!(swipes.use_swipe(), Ok(left));
        }
        assert_eq!(swipes.use_swipe(), Err(SwipeError::NoneLeft));
        assert_eq!(swipes.remaining(), 0);
    }

    #[test]
    fn test_buy_spends_coins() {
        let mut swipes = SwipeCounter::new(0);
        let mut wallet = InMemoryWallet::new(UserId::new("u"), 150);
        assert_eq!(swipes.buy_swipes(&mut wallet), Ok(10));
        assert_eq!(wallet.balance(), 50);
        assert_eq!(
            swipes.buy_swipes(&mut wallet),
            Err(SwipeError::Wallet(WalletError::InsufficientFunds {
                needed: 100,
                available: 50
            }))
        );
        assert_eq!(swipes.remaining(), 10);
    }
}
