use std::collections::HashMap;

use itertools::Itertools as _;
use tracing::debug;

use crate::conversations::{Conversation, Message};
use crate::dashboard::Dashboard;
use crate::error::CatalogError;
use crate::mentor::MentorProfile;
use crate::model::CatalogItem;
use crate::session::MentoringSession;
use crate::slots::TimeSlot;

/// Read access to everything the marketplace pages display.
pub trait CatalogRepository: Send + Sync {
    fn skills(&self) -> &[CatalogItem];

    fn mentor(&self, id: &str) -> Option<&MentorProfile>;

    fn slots(&self, mentor_id: &str) -> Option<&[TimeSlot]> {
        self.mentor(mentor_id).map(|mentor| mentor.slots.as_slice())
    }

    fn conversations(&self) -> &[Conversation];

    fn messages(&self, conversation_id: &str) -> Option<&[Message]>;

    fn session(&self, id: &str) -> Option<&MentoringSession>;

    /// Chat between mentor and learner on the session page.
    fn session_messages(&self, session_id: &str) -> Option<&[Message]>;

    fn dashboard(&self) -> Option<&Dashboard>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalog {
    skills: Vec<CatalogItem>,
    mentors: Vec<MentorProfile>,
    conversations: Vec<Conversation>,
    threads: HashMap<String, Vec<Message>>,
    sessions: Vec<MentoringSession>,
    session_chats: HashMap<String, Vec<Message>>,
    dashboard: Option<Dashboard>,
}

impl CatalogRepository for InMemoryCatalog {
    fn skills(&self) -> &[CatalogItem] {
        &self.skills
    }

    fn mentor(&self, id: &str) -> Option<&MentorProfile> {
        self.mentors.iter().find(|mentor| mentor.id == id)
    }

    fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    fn messages(&self, conversation_id: &str) -> Option<&[Message]> {
        if let Some(thread) = self.threads.get(conversation_id) {
            return Some(thread.as_slice());
        }
        // a known conversation without messages has an empty thread
        self.conversations
            .iter()
            .any(|conversation| conversation.id == conversation_id)
            .then_some(&[][..])
    }

    fn session(&self, id: &str) -> Option<&MentoringSession> {
        self.sessions.iter().find(|session| session.id == id)
    }

    fn session_messages(&self, session_id: &str) -> Option<&[Message]> {
        self.session(session_id)?;
        Some(
            self.session_chats
                .get(session_id)
                .map_or(&[][..], Vec::as_slice),
        )
    }

    fn dashboard(&self) -> Option<&Dashboard> {
        self.dashboard.as_ref()
    }
}

#[derive(Debug, Default)]
#[must_use]
pub struct CatalogBuilder {
    catalog: InMemoryCatalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skill(mut self, item: CatalogItem) -> Self {
        self.catalog.skills.push(item);
        self
    }

    pub fn skills(mut self, items: impl IntoIterator<Item = CatalogItem>) -> Self {
        self.catalog.skills.extend(items);
        self
    }

    pub fn mentor(mut self, mentor: MentorProfile) -> Self {
        self.catalog.mentors.push(mentor);
        self
    }

    pub fn conversation(mut self, conversation: Conversation, messages: Vec<Message>) -> Self {
        if !messages.is_empty() {
            self.catalog
                .threads
                .insert(conversation.id.clone(), messages);
        }
        self.catalog.conversations.push(conversation);
        self
    }

    pub fn session(mut self, session: MentoringSession, chat: Vec<Message>) -> Self {
        if !chat.is_empty() {
            self.catalog.session_chats.insert(session.id.clone(), chat);
        }
        self.catalog.sessions.push(session);
        self
    }

    pub fn dashboard(mut self, dashboard: Dashboard) -> Self {
        self.catalog.dashboard = Some(dashboard);
        self
    }

    /// Validates every item and rejects duplicate ids per kind.
    pub fn build(self) -> Result<InMemoryCatalog, CatalogError> {
        let catalog = self.catalog;
        for item in &catalog.skills {
            item.validate()?;
        }
        check_unique("skill", catalog.skills.iter().map(|item| &item.id))?;
        check_unique("mentor", catalog.mentors.iter().map(|mentor| &mentor.id))?;
        check_unique(
            "conversation",
            catalog.conversations.iter().map(|conversation| &conversation.id),
        )?;
        check_unique("session", catalog.sessions.iter().map(|session| &session.id))?;
        debug!(
            skills = catalog.skills.len(),
            mentors = catalog.mentors.len(),
            conversations = catalog.conversations.len(),
            sessions = catalog.sessions.len(),
            "built catalog"
        );
        Ok(catalog)
    }
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a String>,
) -> Result<(), CatalogError> {
    match ids.duplicates().next() {
        Some(id) => Err(CatalogError::DuplicateId {
            kind,
            id: id.clone(),
        }),
        None => Ok(()),
    }
}
