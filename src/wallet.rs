//! Coin wallet
//!
//! [`WalletService`] is the seam to the hosted backend's wallet and
//! transaction tables. The game code receives a `&mut dyn WalletService`
//! rather than reaching for a global store. [`InMemoryWallet`] keeps the
//! balance and transaction rows locally and pushes balance changes on a
//! realtime channel.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::UserId;
use crate::feedback::{FeedbackSink, Haptic, Toast};
use crate::realtime::{Channel, Subscription};

/// Direction of a transaction row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Earn,
    Spend,
}

/// One earn/spend row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub user_id: UserId,
    pub kind: TransactionKind,
    pub amount: u64,
    pub reason: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("no signed-in user")]
    NotSignedIn,
    #[error("insufficient coins: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },
    #[error("amount must be positive")]
    ZeroAmount,
    #[error("wallet backend error: {0}")]
    Backend(String),
}

/// Balance store with earn/spend bookkeeping
pub trait WalletService {
    fn balance(&self) -> u64;

    /// Credit coins, returning the new balance
    fn earn(&mut self, amount: u64, reason: &str) -> Result<u64, WalletError>;

    /// Debit coins, returning the new balance
    fn spend(&mut self, amount: u64, reason: &str) -> Result<u64, WalletError>;
}

/// Local wallet for one user
pub struct InMemoryWallet {
    user: Option<UserId>,
    balance: u64,
    ledger: Vec<Transaction>,
    updates: Channel<u64>,
}

impl InMemoryWallet {
    pub fn new(user: UserId, balance: u64) -> Self {
        Self {
            user: Some(user),
            balance,
            ledger: Vec::new(),
            updates: Channel::new("wallet-balance"),
        }
    }

    /// Wallet with no session: every mutation fails with `NotSignedIn`
    pub fn signed_out() -> Self {
        Self {
            user: None,
            balance: 0,
            ledger: Vec::new(),
            updates: Channel::new("wallet-balance"),
        }
    }

    pub fn user(&self) -> Option<&UserId> {
        self.user.as_ref()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger
    }

    /// Be told about every balance change
    pub fn subscribe(&self, handler: impl FnMut(&u64) + 'static) -> Subscription {
        self.updates.subscribe(handler)
    }

    /// Append a row and commit `balance`; nothing changes on error
    fn commit(
        &mut self,
        kind: TransactionKind,
        amount: u64,
        reason: &str,
        balance: u64,
    ) -> Result<u64, WalletError> {
        let user = self.user.as_ref().ok_or(WalletError::NotSignedIn)?;
        self.ledger.push(Transaction {
            user_id: user.clone(),
            kind,
            amount,
            reason: reason.to_string(),
        });
        self.balance = balance;
        self.updates.publish(&self.balance);
        Ok(balance)
    }
}

impl WalletService for InMemoryWallet {
    fn balance(&self) -> u64 {
        self.balance
    }

    fn earn(&mut self, amount: u64, reason: &str) -> Result<u64, WalletError> {
        if amount == 0 {
            return Err(WalletError::ZeroAmount);
        }
        if self.user.is_none() {
            return Err(WalletError::NotSignedIn);
        }
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| WalletError::Backend("balance overflow".into()))?;
        self.commit(TransactionKind::Earn, amount, reason, balance)
    }

    fn spend(&mut self, amount: u64, reason: &str) -> Result<u64, WalletError> {
        if amount == 0 {
            return Err(WalletError::ZeroAmount);
        }
        if self.user.is_none() {
            return Err(WalletError::NotSignedIn);
        }
        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or(WalletError::InsufficientFunds {
                needed: amount,
                available: self.balance,
            })?;
        self.commit(TransactionKind::Spend, amount, reason, balance)
    }
}

/// Credit coins and tell the player how it went
pub fn earn_with_feedback(
    wallet: &mut dyn WalletService,
    amount: u64,
    reason: &str,
    feedback: &mut dyn FeedbackSink,
) -> bool {
    match wallet.earn(amount, reason) {
        Ok(_) => {
            feedback.notify(Toast::success(format!("+{amount} coins")).with_description(reason));
            true
        }
        Err(e) => {
            log::error!("Error adding coins: {}", e);
            feedback.haptic(Haptic::ERROR);
            feedback.notify(Toast::error("Could not credit coins"));
            false
        }
    }
}

/// Debit coins and tell the player how it went
pub fn spend_with_feedback(
    wallet: &mut dyn WalletService,
    amount: u64,
    reason: &str,
    feedback: &mut dyn FeedbackSink,
) -> bool {
    match wallet.spend(amount, reason) {
        Ok(_) => {
            feedback.notify(Toast::success(format!("-{amount} coins")).with_description(reason));
            true
        }
        Err(WalletError::InsufficientFunds { needed, .. }) => {
            feedback.haptic(Haptic::WARNING);
            feedback.notify(
                Toast::error("Not enough coins").with_description(format!("Need {needed} coins")),
            );
            false
        }
        Err(e) => {
            log::error!("Error spending coins: {}", e);
            feedback.haptic(Haptic::ERROR);
            feedback.notify(Toast::error("Could not spend coins"));
            false
        }
    }
}
