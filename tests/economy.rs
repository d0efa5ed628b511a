//! Coins flowing between tasks, chests, swipes and the wallet

use std::cell::RefCell;
use std::rc::Rc;

use hoop_hub::UserId;
use hoop_hub::feedback::RecordingFeedback;
use hoop_hub::rewards::{self, Inventory, Reward, RewardChest};
use hoop_hub::sim::Scoreboard;
use hoop_hub::swipes::{SWIPE_COST, SwipeCounter, SwipeError};
use hoop_hub::tasks::{TaskError, TaskProgress};
use hoop_hub::wallet::{InMemoryWallet, TransactionKind, WalletService, spend_with_feedback};

#[test]
fn task_claims_fund_swipe_purchases() {
    let mut wallet = InMemoryWallet::new(UserId::new("fan-7"), 0);
    let mut progress = TaskProgress::new();

    let board = Scoreboard {
        score: 120,
        combo: 0,
        best_combo: 6,
        makes: 60,
        attempts: 80,
    };
    let completed: Vec<_> = progress.record_round(&board).iter().map(|t| t.id).collect();
    assert_eq!(completed, vec!["6", "7", "8"]);

    let total: u64 = completed
        .iter()
        .map(|id| progress.claim(id, &mut wallet).unwrap())
        .sum();
    assert_eq!(total, 50 + 100 + 150);
    assert_eq!(wallet.balance(), 300);
    assert!(matches!(
        progress.claim("8", &mut wallet),
        Err(TaskError::AlreadyClaimed(_))
    ));

    let mut swipes = SwipeCounter::new(0);
    assert_eq!(swipes.use_swipe(), Err(SwipeError::NoneLeft));
    swipes.buy_swipes(&mut wallet).unwrap();
    swipes.buy_swipes(&mut wallet).unwrap();
    swipes.buy_swipes(&mut wallet).unwrap();
    assert_eq!(wallet.balance(), 0);
    assert_eq!(swipes.remaining(), 30);
    assert!(swipes.buy_swipes(&mut wallet).is_err());

    let spends = wallet
        .transactions()
        .iter()
        .filter(|t| t.kind == TransactionKind::Spend)
        .count();
    assert_eq!(spends, 3);
}

#[test]
fn chest_rewards_reach_wallet_or_inventory() {
    let mut wallet = InMemoryWallet::new(UserId::new("fan-8"), 0);
    let mut inventory = Inventory::default();
    let mut chest = RewardChest::new(2024);

    let mut coins = 0;
    for _ in 0..50 {
        let reward = chest.open();
        if let Reward::Coins { amount } = reward {
            coins += amount;
        }
        rewards::claim(&reward, &mut wallet, &mut inventory).unwrap();
    }
    assert_eq!(wallet.balance(), coins);
    assert_eq!(
        wallet.transactions().len() + inventory.tickets.len() + inventory.merch.len(),
        50
    );
}

#[test]
fn balance_listeners_see_every_change() {
    let mut wallet = InMemoryWallet::new(UserId::new("fan-9"), SWIPE_COST);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let seen = seen.clone();
        wallet.subscribe(move |balance| seen.borrow_mut().push(*balance))
    };

    let mut fb = RecordingFeedback::default();
    assert!(spend_with_feedback(&mut wallet, SWIPE_COST, "swipes", &mut fb));
    assert!(!spend_with_feedback(&mut wallet, 1, "swipes", &mut fb));
    wallet.earn(25, "reward_chest").unwrap();

    assert_eq!(*seen.borrow(), vec![0, 25]);
    assert_eq!(fb.toasts.len(), 2);
}
