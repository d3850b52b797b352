use core::fmt::{self, Display};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// The fixed set of skill categories a catalog item can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Programming,
    Design,
    Music,
    Cooking,
    Photography,
    Languages,
    Fitness,
}

impl Category {
    /// All categories in the order the category pills are shown.
    pub const ALL: [Self; 7] = [
        Self::Programming,
        Self::Design,
        Self::Music,
        Self::Cooking,
        Self::Photography,
        Self::Languages,
        Self::Fitness,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Programming => "Programming",
            Self::Design => "Design",
            Self::Music => "Music",
            Self::Cooking => "Cooking",
            Self::Photography => "Photography",
            Self::Languages => "Languages",
            Self::Fitness => "Fitness",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == s)
            .ok_or_else(|| CatalogError::UnknownSelector {
                dimension: "category",
                value: s.to_owned(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentorSummary {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub title: String,
}

/// A bookable skill offering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    pub category: Category,
    pub description: String,
    pub price: f64,
    pub duration: String,
    pub rating: f64,
    pub review_count: u32,
    pub tags: Vec<String>,
    pub mentor: MentorSummary,
    pub students_count: u32,
    /// Free text such as "Tomorrow at 2:00 PM", not a real point in time.
    pub next_available: String,
}

impl CatalogItem {
    pub const MAX_RATING: f64 = 5.0;

    /// Checks the invariants every item in a catalog has to hold.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::MissingId);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::InvalidPrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        if !(0.0..=Self::MAX_RATING).contains(&self.rating) {
            return Err(CatalogError::InvalidRating {
                id: self.id.clone(),
                rating: self.rating,
            });
        }
        Ok(())
    }
}
