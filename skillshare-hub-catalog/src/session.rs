use core::fmt::{self, Display};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::MentorSummary;

/// Lifecycle of a booked mentoring session.
///
/// ```text
/// upcoming -> in-progress -> completed
/// upcoming -> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    Upcoming,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot {action} a session that is {from}")]
pub struct TransitionError {
    pub from: SessionStatus,
    pub action: &'static str,
}

impl SessionStatus {
    pub const fn start(self) -> Result<Self, TransitionError> {
        match self {
            Self::Upcoming => Ok(Self::InProgress),
            Self::InProgress | Self::Completed | Self::Cancelled => Err(TransitionError {
                from: self,
                action: "start",
            }),
        }
    }

    pub const fn complete(self) -> Result<Self, TransitionError> {
        match self {
            Self::InProgress => Ok(Self::Completed),
            Self::Upcoming | Self::Completed | Self::Cancelled => Err(TransitionError {
                from: self,
                action: "complete",
            }),
        }
    }

    pub const fn cancel(self) -> Result<Self, TransitionError> {
        match self {
            Self::Upcoming => Ok(Self::Cancelled),
            Self::InProgress | Self::Completed | Self::Cancelled => Err(TransitionError {
                from: self,
                action: "cancel",
            }),
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    #[must_use]
    pub const fn can_reschedule(self) -> bool {
        matches!(self, Self::Upcoming)
    }

    #[must_use]
    pub const fn can_cancel(self) -> bool {
        matches!(self, Self::Upcoming)
    }

    #[must_use]
    pub const fn can_leave_feedback(self) -> bool {
        matches!(self, Self::Completed)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upcoming => "Upcoming",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentoringSession {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: SessionStatus,
    pub mentor: MentorSummary,
    pub starts_at: NaiveDateTime,
    pub duration_minutes: u32,
    pub price: f64,
    pub timezone: String,
    pub meeting_link: String,
    pub materials: Vec<Material>,
    pub learning_goals: Vec<String>,
    pub notes: String,
}

/// What the session page may offer for the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionActions {
    pub can_reschedule: bool,
    pub can_cancel: bool,
    pub can_leave_feedback: bool,
}

impl MentoringSession {
    #[must_use]
    pub const fn actions(&self) -> SessionActions {
        SessionActions {
            can_reschedule: self.status.can_reschedule(),
            can_cancel: self.status.can_cancel(),
            can_leave_feedback: self.status.can_leave_feedback(),
        }
    }

    /// Feedback is only taken once the session is completed.
    pub fn leave_feedback(&self, rating: u8, comment: &str) -> Result<Feedback, FeedbackError> {
        if !self.status.can_leave_feedback() {
            return Err(FeedbackError::NotCompleted(self.status));
        }
        Feedback::new(&self.id, rating, comment)
    }
}

pub const MAX_FEEDBACK_LENGTH: usize = 2000;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackError {
    #[error("Please choose a rating from 1 to 5.")]
    InvalidRating(u8),
    #[error("Feedback must be at most 2000 characters.")]
    TooLong,
    #[error("Feedback can only be left for completed sessions.")]
    NotCompleted(SessionStatus),
}

/// A star rating with an optional comment, left on a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    session_id: String,
    rating: u8,
    comment: String,
}

impl Feedback {
    pub const RATINGS: core::ops::RangeInclusive<u8> = 1..=5;

    fn new(session_id: &str, rating: u8, comment: &str) -> Result<Self, FeedbackError> {
        if !Self::RATINGS.contains(&rating) {
            return Err(FeedbackError::InvalidRating(rating));
        }
        let comment = comment.trim();
        if comment.chars().count() > MAX_FEEDBACK_LENGTH {
            return Err(FeedbackError::TooLong);
        }
        Ok(Self {
            session_id: session_id.to_owned(),
            rating,
            comment: comment.to_owned(),
        })
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub const fn rating(&self) -> u8 {
        self.rating
    }

    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let status = SessionStatus::Upcoming.start().unwrap();
        assert_eq!(status, SessionStatus::InProgress);
        let status = status.complete().unwrap();
        assert_eq!(status, SessionStatus::Completed);
        assert!(status.is_terminal());
        assert!(status.can_leave_feedback());
    }

    #[test]
    fn only_upcoming_sessions_can_be_cancelled() {
        assert_eq!(
            SessionStatus::Upcoming.cancel(),
            Ok(SessionStatus::Cancelled)
        );
        for status in [
            SessionStatus::InProgress,
            SessionStatus::Completed,
            SessionStatus::Cancelled,
        ] {
            assert_eq!(
                status.cancel(),
                Err(TransitionError {
                    from: status,
                    action: "cancel"
                })
            );
        }
    }

    #[test]
    fn terminal_states_do_not_move() {
        for status in [SessionStatus::Completed, SessionStatus::Cancelled] {
            assert!(status.start().is_err());
            assert!(status.complete().is_err());
            assert!(status.cancel().is_err());
        }
        assert!(SessionStatus::Upcoming.complete().is_err());
    }

    #[test]
    fn actions_follow_status() {
        assert!(SessionStatus::Upcoming.can_reschedule());
        assert!(!SessionStatus::InProgress.can_reschedule());
        assert!(!SessionStatus::Cancelled.can_cancel());
        assert!(!SessionStatus::Upcoming.can_leave_feedback());
    }

    fn session(status: SessionStatus) -> MentoringSession {
        let mut session = crate::fixtures::demo_session().unwrap();
        session.status = status;
        session
    }

    #[test]
    fn feedback_needs_a_completed_session() {
        for status in [
            SessionStatus::Upcoming,
            SessionStatus::InProgress,
            SessionStatus::Cancelled,
        ] {
            assert_eq!(
                session(status).leave_feedback(5, "great"),
                Err(FeedbackError::NotCompleted(status))
            );
        }
        let feedback = session(SessionStatus::Completed)
            .leave_feedback(4, "  Clear explanations of useReducer. ")
            .unwrap();
        assert_eq!(feedback.session_id(), "session-123");
        assert_eq!(feedback.rating(), 4);
        assert_eq!(feedback.comment(), "Clear explanations of useReducer.");
    }

    #[test]
    fn feedback_rating_and_length() {
        let completed = session(SessionStatus::Completed);
        assert_eq!(
            completed.leave_feedback(0, ""),
            Err(FeedbackError::InvalidRating(0))
        );
        assert_eq!(
            completed.leave_feedback(6, ""),
            Err(FeedbackError::InvalidRating(6))
        );
        assert!(completed.leave_feedback(1, "").is_ok());
        assert_eq!(
            completed.leave_feedback(5, &"x".repeat(MAX_FEEDBACK_LENGTH + 1)),
            Err(FeedbackError::TooLong)
        );
        assert_eq!(
            FeedbackError::NotCompleted(SessionStatus::Upcoming).to_string(),
            "Feedback can only be left for completed sessions."
        );
    }

    #[test]
    fn serialized_names() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(SessionStatus::InProgress.to_string(), "In Progress");
        let error = SessionStatus::Completed.start().unwrap_err();
        assert_eq!(error.to_string(), "cannot start a session that is Completed");
    }
}
