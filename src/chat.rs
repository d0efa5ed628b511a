//! Fan chat feed backed by a realtime channel

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::UserId;
use crate::realtime::{Channel, Subscription};

/// Messages kept in the local history
pub const CHAT_HISTORY_LIMIT: usize = 100;

/// A stored chat row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub user_id: UserId,
    pub message: String,
    /// Unix timestamp (ms)
    pub created_at: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ChatError {
    #[error("sign in to chat")]
    NotSignedIn,
    #[error("message is empty")]
    Empty,
}

/// Chat history plus the insert feed other views listen on
pub struct ChatRoom {
    history: Vec<ChatMessage>,
    inserts: Channel<ChatMessage>,
    next_id: u64,
}

impl Default for ChatRoom {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatRoom {
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            inserts: Channel::new("chat-messages"),
            next_id: 1,
        }
    }

    /// Oldest first, at most [`CHAT_HISTORY_LIMIT`] rows
    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    /// Listen for newly inserted messages
    pub fn subscribe(&self, handler: impl FnMut(&ChatMessage) + 'static) -> Subscription {
        self.inserts.subscribe(handler)
    }

    /// Insert a message and redeliver it to subscribers
    pub fn send(
        &mut self,
        user: Option<&UserId>,
        text: &str,
        now_ms: f64,
    ) -> Result<ChatMessage, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::Empty);
        }
        let user = user.ok_or(ChatError::NotSignedIn)?;

        let row = ChatMessage {
            id: self.next_id,
            user_id: user.clone(),
            message: text.to_string(),
            created_at: now_ms,
        };
        self.next_id += 1;

        self.history.push(row.clone());
        if self.history.len() > CHAT_HISTORY_LIMIT {
            let overflow = self.history.len() - CHAT_HISTORY_LIMIT;
            self.history.drain(..overflow);
        }
        let delivered = self.inserts.publish(&row);
        log::debug!("chat message {} delivered to {} listeners", row.id, delivered);
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_send_redelivers_to_listeners() {
        let mut room = ChatRoom::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let seen = seen.clone();
            room.subscribe(move |m: &ChatMessage| seen.borrow_mut().push(m.message.clone()))
        };

        let user = UserId::new("u1");
        room.send(Some(&user), "  go team  ", 1.0).unwrap();
        assert_eq!(*seen.borrow(), vec!["go team".to_string()]);
        assert_eq!(room.history().len(), 1);
    }

    #[test]
    fn test_rejects_empty_and_anonymous() {
        let mut room = ChatRoom::new();
        assert_eq!(room.send(Some(&UserId::new("u")), "   ", 0.0), Err(ChatError::Empty));
        assert_eq!(room.send(None, "hi", 0.0), Err(ChatError::NotSignedIn));
        assert!(room.history().is_empty());
    }

    #[test]
    fn test_history_is_capped() {
        let mut room = ChatRoom::new();
        let user = UserId::new("u");
        for i in 0..(CHAT_HISTORY_LIMIT + 5) {
            room.send(Some(&user), &format!("msg {i}"), i as f64).unwrap();
        }
        assert_eq!(room.history().len(), CHAT_HISTORY_LIMIT);
        assert_eq!(room.history()[0].message, "msg 5");
    }
}
