//! Session domain entities

use super::inventory::IngredientInventory;
use super::key::SessionKey;
use serde::{Deserialize, Serialize};

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in a conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Transient per-session markers set by frontend-owned actions.
///
/// These never influence reply parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionFlags {
    pub recipe_downloaded: bool,
    pub recipe_liked: bool,
}

/// A conversation session (Entity)
///
/// Holds the ordered conversation history sent verbatim as model context,
/// plus the ingredient inventory derived from the user's own messages.
#[derive(Debug, Clone)]
pub struct Session {
    key: SessionKey,
    history: Vec<Message>,
    inventory: IngredientInventory,
    flags: SessionFlags,
}

impl Session {
    pub fn new(key: SessionKey) -> Self {
        Self {
            key,
            history: Vec::new(),
            inventory: IngredientInventory::default(),
            flags: SessionFlags::default(),
        }
    }

    pub fn key(&self) -> &SessionKey {
        &self.key
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn inventory(&self) -> &IngredientInventory {
        &self.inventory
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    pub fn append(&mut self, message: Message) {
        self.history.push(message);
    }

    /// Commit one completed exchange: the exact user text the model saw,
    /// its reply, and the inventory computed for that turn.
    pub fn commit_turn(
        &mut self,
        user_text: impl Into<String>,
        reply: impl Into<String>,
        inventory: IngredientInventory,
    ) {
        self.history.push(Message::user(user_text));
        self.history.push(Message::assistant(reply));
        self.inventory = inventory;
    }

    /// Drop the oldest messages until at most `max_messages` remain.
    ///
    /// History never starts with an assistant message after trimming, so
    /// user/assistant pairs stay aligned. A cap of zero disables trimming.
    pub fn trim_history(&mut self, max_messages: usize) {
        if max_messages == 0 || self.history.len() <= max_messages {
            return;
        }
        let mut excess = self.history.len() - max_messages;
        while excess < self.history.len() && self.history[excess].role == Role::Assistant {
            excess += 1;
        }
        self.history.drain(..excess);
    }

    pub fn mark_downloaded(&mut self) {
        self.flags.recipe_downloaded = true;
    }

    pub fn mark_liked(&mut self) {
        self.flags.recipe_liked = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SessionKey::new("s1"))
    }

    #[test]
    fn test_new_session_is_empty() {
        let s = session();
        assert!(s.history().is_empty());
        assert!(s.inventory().have().is_empty());
        assert!(s.inventory().missing().is_empty());
        assert_eq!(s.flags(), SessionFlags::default());
    }

    #[test]
    fn test_commit_turn_preserves_order() {
        let mut s = session();
        s.commit_turn("hi", "hello!", IngredientInventory::default());
        s.commit_turn("I have eggs", "great", IngredientInventory::default());

        let roles: Vec<Role> = s.history().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(s.history()[2].content, "I have eggs");
    }

    #[test]
    fn test_trim_history_keeps_pairs() {
        let mut s = session();
        for i in 0..5 {
            s.commit_turn(format!("u{i}"), format!("a{i}"), IngredientInventory::default());
        }
        // Cap of 5 would leave an assistant message first; it is dropped too.
        s.trim_history(5);
        assert_eq!(s.history().len(), 4);
        assert_eq!(s.history()[0].content, "u3");
    }

    #[test]
    fn test_trim_history_zero_disables() {
        let mut s = session();
        s.commit_turn("u", "a", IngredientInventory::default());
        s.trim_history(0);
        assert_eq!(s.history().len(), 2);
    }

    #[test]
    fn test_flags() {
        let mut s = session();
        s.mark_liked();
        assert!(s.flags().recipe_liked);
        assert!(!s.flags().recipe_downloaded);
        s.mark_downloaded();
        assert!(s.flags().recipe_downloaded);
    }
}
