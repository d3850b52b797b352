use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub last_message: String,
    pub time: String,
    pub unread: u32,
    pub online: bool,
    pub skill: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: String,
    pub content: String,
    pub time: String,
    pub is_own: bool,
}

/// Conversations whose participant or skill contains `query`, ignoring case.
#[must_use]
pub fn search_conversations<'a>(query: &str, conversations: &'a [Conversation]) -> Vec<&'a Conversation> {
    let needle = query.to_lowercase();
    conversations
        .iter()
        .filter(|conversation| {
            conversation.name.to_lowercase().contains(&needle)
                || conversation.skill.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Text typed into the message box but not sent yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDraft {
    text: String,
}

impl MessageDraft {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the trimmed text and empties the draft. Blank drafts are kept as they are.
    pub fn take_sendable(&mut self) -> Option<String> {
        let trimmed = self.text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let message = trimmed.to_owned();
        self.text.clear();
        Some(message)
    }

    /// The own message a chat appends when the draft is sent.
    pub fn compose(&mut self, id: impl Into<String>, time: impl Into<String>) -> Option<Message> {
        let content = self.take_sendable()?;
        Some(Message {
            id: id.into(),
            sender: "You".to_owned(),
            content,
            time: time.into(),
            is_own: true,
        })
    }
}
