//! Task catalog and progress
//!
//! Social and partner tasks are completed when the player confirms them;
//! game tasks complete themselves from shooting-round results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::Scoreboard;
use crate::wallet::{WalletError, WalletService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Social,
    Partner,
    Game,
}

/// Condition a game task checks against round results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameGoal {
    /// At least one launched shot
    FirstShot,
    /// A combo of this length in one round
    MakesInARow(u32),
    /// Lifetime points across all rounds
    TotalPoints(u32),
}

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Coins paid on claim
    pub reward: u64,
    pub kind: TaskKind,
    pub link: Option<&'static str>,
    pub goal: Option<GameGoal>,
}

pub const TASKS: &[Task] = &[
    Task {
        id: "1",
        title: "Follow on Instagram",
        description: "Follow the league's Media Basket Instagram",
        reward: 200,
        kind: TaskKind::Social,
        link: Some("https://instagram.com/ligastavok_mediabasket"),
        goal: None,
    },
    Task {
        id: "2",
        title: "Media Basket Telegram channel",
        description: "Subscribe to the Media Basket Telegram channel",
        reward: 200,
        kind: TaskKind::Social,
        link: Some("https://t.me/mediabasket"),
        goal: None,
    },
    Task {
        id: "3",
        title: "League Telegram channel",
        description: "Subscribe to the league's main Telegram channel",
        reward: 200,
        kind: TaskKind::Social,
        link: Some("https://t.me/ligastavok"),
        goal: None,
    },
    Task {
        id: "4",
        title: "Partner bank card",
        description: "Get the partner bank card and collect bonuses",
        reward: 500,
        kind: TaskKind::Partner,
        link: Some("https://www.tinkoff.ru/cards/"),
        goal: None,
    },
    Task {
        id: "5",
        title: "Grocery delivery order",
        description: "Place your first order with the delivery partner",
        reward: 300,
        kind: TaskKind::Partner,
        link: Some("https://samokat.ru/"),
        goal: None,
    },
    Task {
        id: "6",
        title: "First shot",
        description: "Take your first shot in the game",
        reward: 50,
        kind: TaskKind::Game,
        link: None,
        goal: Some(GameGoal::FirstShot),
    },
    Task {
        id: "7",
        title: "Sharpshooter",
        description: "Make 5 shots in a row",
        reward: 100,
        kind: TaskKind::Game,
        link: None,
        goal: Some(GameGoal::MakesInARow(5)),
    },
    Task {
        id: "8",
        title: "Shot master",
        description: "Score 100 points",
        reward: 150,
        kind: TaskKind::Game,
        link: None,
        goal: Some(GameGoal::TotalPoints(100)),
    },
];

pub fn find_task(id: &str) -> Option<&'static Task> {
    TASKS.iter().find(|t| t.id == id)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[default]
    Open,
    Completed,
    Claimed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    #[error("unknown task '{0}'")]
    Unknown(String),
    #[error("task '{0}' is not completed yet")]
    NotCompleted(String),
    #[error("task '{0}' was already claimed")]
    AlreadyClaimed(String),
    #[error("task '{0}' completes from game results")]
    GameOnly(String),
    #[error(transparent)]
    Wallet(#[from] WalletError),
}

/// Per-player task state plus the game stats game tasks read
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskProgress {
    status: BTreeMap<String, TaskStatus>,
    pub lifetime_points: u64,
    pub lifetime_attempts: u64,
    pub best_combo: u32,
}

impl TaskProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self, id: &str) -> TaskStatus {
        self.status.get(id).copied().unwrap_or_default()
    }

    /// Player reports a social/partner task done
    pub fn complete(&mut self, id: &str) -> Result<(), TaskError> {
        let task = find_task(id).ok_or_else(|| TaskError::Unknown(id.to_string()))?;
        if task.kind == TaskKind::Game {
            return Err(TaskError::GameOnly(id.to_string()));
        }
        if self.status(id) == TaskStatus::Open {
            self.status.insert(id.to_string(), TaskStatus::Completed);
        }
        Ok(())
    }

    /// Fold a finished round into the stats. Returns newly completed game tasks.
    pub fn record_round(&mut self, board: &Scoreboard) -> Vec<&'static Task> {
        self.lifetime_points += u64::from(board.score);
        self.lifetime_attempts += u64::from(board.attempts);
        self.best_combo = self.best_combo.max(board.best_combo);

        let mut newly = Vec::new();
        for task in TASKS {
            let Some(goal) = task.goal else { continue };
            if self.status(task.id) != TaskStatus::Open || !self.goal_met(goal) {
                continue;
            }
            self.status.insert(task.id.to_string(), TaskStatus::Completed);
            log::info!("task '{}' completed", task.title);
            newly.push(task);
        }
        newly
    }

    fn goal_met(&self, goal: GameGoal) -> bool {
        match goal {
            GameGoal::FirstShot => self.lifetime_attempts >= 1,
            GameGoal::MakesInARow(n) => self.best_combo >= n,
            GameGoal::TotalPoints(n) => self.lifetime_points >= u64::from(n),
        }
    }

    /// Pay a completed task into the wallet, once
    pub fn claim(&mut self, id: &str, wallet: &mut dyn WalletService) -> Result<u64, TaskError> {
        let task = find_task(id).ok_or_else(|| TaskError::Unknown(id.to_string()))?;
        match self.status(id) {
            TaskStatus::Open => Err(TaskError::NotCompleted(id.to_string())),
            TaskStatus::Claimed => Err(TaskError::AlreadyClaimed(id.to_string())),
            TaskStatus::Completed => {
                wallet.earn(task.reward, &format!("task:{}", task.id))?;
                self.status.insert(id.to_string(), TaskStatus::Claimed);
                Ok(task.reward)
            }
        }
    }

    /// Tasks ready to claim
    pub fn claimable(&self) -> impl Iterator<Item = &'static Task> + '_ {
        TASKS
            .iter()
            .filter(|t| self.status(t.id) == TaskStatus::Completed)
    }
}
