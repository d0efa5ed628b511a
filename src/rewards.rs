//! Reward drops: coins, match tickets, merch
//!
//! Rolls use a seeded PCG generator so a chest sequence can be replayed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::wallet::{WalletError, WalletService};

/// What a drop contains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reward {
    Coins { amount: u64 },
    Ticket { item: String },
    Merch { item: String },
}

impl Reward {
    /// Headline shown when the reward is revealed
    pub fn title(&self) -> String {
        match self {
            Reward::Coins { amount } => format!("{amount} coins"),
            Reward::Ticket { item } | Reward::Merch { item } => item.clone(),
        }
    }

    /// Where the player finds it afterwards
    pub fn destination(&self) -> &'static str {
        match self {
            Reward::Coins { .. } => "Added to your balance",
            Reward::Ticket { .. } => "Available on the Home screen",
            Reward::Merch { .. } => "Available in the merch store",
        }
    }
}

/// Coin amount rule for a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinRoll {
    Fixed(u64),
    /// Inclusive range
    Range { min: u64, max: u64 },
}

/// Drop weights and item pools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardTable {
    pub coins: CoinRoll,
    /// Probability of coins
    pub coin_chance: f32,
    /// Probability of a ticket (merch takes the rest)
    pub ticket_chance: f32,
    pub ticket_item: String,
    pub merch_items: Vec<String>,
}

impl RewardTable {
    /// Reward chest: 50 to 499 coins, or a prize
    pub fn chest() -> Self {
        Self {
            coins: CoinRoll::Range { min: 50, max: 499 },
            coin_chance: 0.70,
            ticket_chance: 0.20,
            ticket_item: "Match ticket".into(),
            merch_items: vec![
                "T-shirt".into(),
                "Cap".into(),
                "Scarf".into(),
                "Bracelet".into(),
            ],
        }
    }

    pub fn roll<R: Rng>(&self, rng: &mut R) -> Reward {
        let r: f32 = rng.random();
        if r < self.coin_chance {
            self.roll_coins(rng)
        } else if r < self.coin_chance + self.ticket_chance {
            Reward::Ticket {
                item: self.ticket_item.clone(),
            }
        } else if self.merch_items.is_empty() {
            self.roll_coins(rng)
        } else {
            let idx = rng.random_range(0..self.merch_items.len());
            Reward::Merch {
                item: self.merch_items[idx].clone(),
            }
        }
    }

    fn roll_coins<R: Rng>(&self, rng: &mut R) -> Reward {
        let amount = match self.coins {
            CoinRoll::Fixed(amount) => amount,
            CoinRoll::Range { min, max } => rng.random_range(min..=max.max(min)),
        };
        Reward::Coins { amount }
    }
}

/// A chest the player opens for a random reward
#[derive(Debug, Clone)]
pub struct RewardChest {
    table: RewardTable,
    rng: Pcg32,
}

impl RewardChest {
    pub fn new(seed: u64) -> Self {
        Self::with_table(RewardTable::chest(), seed)
    }

    pub fn with_table(table: RewardTable, seed: u64) -> Self {
        Self {
            table,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn open(&mut self) -> Reward {
        let reward = self.table.roll(&mut self.rng);
        log::info!("chest opened: {:?}", reward);
        reward
    }
}

/// Non-coin prizes the player owns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub tickets: Vec<String>,
    pub merch: Vec<String>,
}

/// Hand a reward to the player: coins to the wallet, prizes to the inventory
pub fn claim(
    reward: &Reward,
    wallet: &mut dyn WalletService,
    inventory: &mut Inventory,
) -> Result<(), WalletError> {
    match reward {
        Reward::Coins { amount } => {
            wallet.earn(*amount, "reward_chest")?;
        }
        Reward::Ticket { item } => inventory.tickets.push(item.clone()),
        Reward::Merch { item } => inventory.merch.push(item.clone()),
    }
    Ok(())
}
