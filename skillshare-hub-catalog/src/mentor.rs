use serde::{Deserialize, Serialize};

use crate::slots::TimeSlot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillOffering {
    pub name: String,
    pub price: f64,
    pub sessions: u32,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorStats {
    pub total_sessions: u32,
    pub students_helped: u32,
    /// Percent.
    pub success_rate: u8,
    pub avg_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub timezone: String,
    pub working_hours: String,
    pub days_available: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub student: String,
    pub avatar: String,
    pub rating: u8,
    pub date: String,
    pub skill: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorProfile {
    pub id: String,
    pub name: String,
    pub title: String,
    pub avatar: String,
    pub rating: f64,
    pub review_count: u32,
    pub location: String,
    pub member_since: String,
    pub response_time: String,
    pub badges: Vec<String>,
    pub bio: String,
    pub skills: Vec<SkillOffering>,
    pub stats: MentorStats,
    pub availability: Availability,
    pub reviews: Vec<Review>,
    /// Bookable slots shown in the calendar panel.
    #[serde(skip)]
    pub slots: Vec<TimeSlot>,
}

impl MentorProfile {
    #[must_use]
    pub fn offering(&self, name: &str) -> Option<&SkillOffering> {
        self.skills.iter().find(|skill| skill.name == name)
    }
}
