//! The member's home page: stats, upcoming sessions and recent activity.

use core::fmt::{self, Display};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub skills_learned: u32,
    pub skills_taught: u32,
    pub total_sessions: u32,
    pub rating: f64,
    /// Whole dollars.
    pub earnings: u32,
    pub students: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub avatar: String,
    pub email: String,
    /// `learner`, `mentor` or `both`.
    pub role: String,
    pub member_since: String,
    pub stats: MemberStats,
}

/// Whether the member attends a session or runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Learning,
    Teaching,
}

impl SessionKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Learning => "Learning",
            Self::Teaching => "Teaching",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingSession {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: SessionKind,
    /// The mentor when learning, the student when teaching.
    pub counterpart: String,
    pub date: String,
    pub time: String,
    pub duration: String,
    pub avatar: String,
}

impl UpcomingSession {
    /// "with Sarah Chen" or "teaching Emily Davis".
    #[must_use]
    pub fn counterpart_label(&self) -> String {
        match self.kind {
            SessionKind::Learning => format!("with {}", self.counterpart),
            SessionKind::Teaching => format!("teaching {}", self.counterpart),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    SessionCompleted,
    ReviewReceived,
    BookingReceived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    #[default]
    Overview,
    Learning,
    Teaching,
}

impl DashboardTab {
    pub const ALL: [Self; 3] = [Self::Overview, Self::Learning, Self::Teaching];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Learning => "learning",
            Self::Teaching => "teaching",
        }
    }

    /// The overview shows every session, the other tabs one kind.
    #[must_use]
    pub fn shows(self, kind: SessionKind) -> bool {
        match self {
            Self::Overview => true,
            Self::Learning => kind == SessionKind::Learning,
            Self::Teaching => kind == SessionKind::Teaching,
        }
    }
}

impl Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for DashboardTab {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.key() == s)
            .ok_or_else(|| CatalogError::UnknownSelector {
                dimension: "tab",
                value: s.to_owned(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub member: Member,
    pub upcoming_sessions: Vec<UpcomingSession>,
    pub recent_activity: Vec<Activity>,
}

/// What one tab of the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView<'a> {
    pub tab: DashboardTab,
    pub member: &'a Member,
    pub upcoming_sessions: Vec<&'a UpcomingSession>,
    pub recent_activity: &'a [Activity],
}

impl Dashboard {
    /// Sessions of the tab in their original order.
    #[must_use]
    pub fn sessions_for(&self, tab: DashboardTab) -> Vec<&UpcomingSession> {
        self.upcoming_sessions
            .iter()
            .filter(|session| tab.shows(session.kind))
            .collect()
    }

    #[must_use]
    pub fn view(&self, tab: DashboardTab) -> DashboardView<'_> {
        DashboardView {
            tab,
            member: &self.member,
            upcoming_sessions: self.sessions_for(tab),
            recent_activity: &self.recent_activity,
        }
    }
}
