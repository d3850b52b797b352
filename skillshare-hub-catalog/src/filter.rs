//! Predicate filters over the skill catalog.
//!
//! Each filter dimension is its own type so every selector value is handled by
//! an exhaustive match. [`Selector::All`] short-circuits its dimension to true.

use core::fmt::{self, Display};
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;
use crate::model::{CatalogItem, Category};

const ALL_LABEL: &str = "All";

/// Either every value of a dimension or exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Selector<T> {
    pub fn admits(&self, predicate: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Self::All => true,
            Self::Only(value) => predicate(value),
        }
    }

    pub const fn selected(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl<T: Display> Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_LABEL),
            Self::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr<Err = CatalogError>> FromStr for Selector<T> {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_LABEL {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: Display> Serialize for Selector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: FromStr<Err = CatalogError>> Deserialize<'de> for Selector<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Fixed price ranges offered by the price filter.
///
/// The ranges are `[0, 50)`, `[50, 75]`, `(75, 100]` and `(100, ∞)`, so a
/// price of exactly 75 belongs to [`PriceBucket::FiftyToSeventyFive`] only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceBucket {
    UnderFifty,
    FiftyToSeventyFive,
    SeventyFiveToHundred,
    OverHundred,
}

impl PriceBucket {
    pub const ALL: [Self; 4] = [
        Self::UnderFifty,
        Self::FiftyToSeventyFive,
        Self::SeventyFiveToHundred,
        Self::OverHundred,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnderFifty => "Under $50",
            Self::FiftyToSeventyFive => "$50-$75",
            Self::SeventyFiveToHundred => "$75-$100",
            Self::OverHundred => "Over $100",
        }
    }

    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        match self {
            Self::UnderFifty => price < 50.0,
            Self::FiftyToSeventyFive => (50.0..=75.0).contains(&price),
            Self::SeventyFiveToHundred => price > 75.0 && price <= 100.0,
            Self::OverHundred => price > 100.0,
        }
    }

    /// The bucket a price falls into. `None` only for NaN.
    #[must_use]
    pub fn of(price: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|bucket| bucket.contains(price))
    }
}

impl Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PriceBucket {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.label() == s)
            .ok_or_else(|| CatalogError::UnknownSelector {
                dimension: "price range",
                value: s.to_owned(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingFloor {
    FourAndHalf,
    Four,
    ThreeAndHalf,
}

impl RatingFloor {
    pub const ALL: [Self; 3] = [Self::FourAndHalf, Self::Four, Self::ThreeAndHalf];

    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::FourAndHalf => 4.5,
            Self::Four => 4.0,
            Self::ThreeAndHalf => 3.5,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FourAndHalf => "4.5+ Stars",
            Self::Four => "4.0+ Stars",
            Self::ThreeAndHalf => "3.5+ Stars",
        }
    }

    #[must_use]
    pub fn admits(self, rating: f64) -> bool {
        rating >= self.threshold()
    }
}

impl Display for RatingFloor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RatingFloor {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|floor| floor.label() == s)
            .ok_or_else(|| CatalogError::UnknownSelector {
                dimension: "rating",
                value: s.to_owned(),
            })
    }
}

/// The state of the search bar and the filter panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    #[serde(alias = "q")]
    pub search: String,
    pub category: Selector<Category>,
    pub price: Selector<PriceBucket>,
    pub rating: Selector<RatingFloor>,
}

impl FilterCriteria {
    #[must_use]
    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.matches_with_needle(&self.search.to_lowercase(), item)
    }

    /// The matching items in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, items: &'a [CatalogItem]) -> FilterResult<'a> {
        let needle = self.search.to_lowercase();
        let skills: Vec<&CatalogItem> = items
            .iter()
            .filter(|item| self.matches_with_needle(&needle, item))
            .collect();
        FilterResult {
            count: skills.len(),
            skills,
        }
    }

    /// Resets every dimension, like the "Clear Filters" button.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        *self == Self::default()
    }

    /// Badges shown above the result list for the active search and category.
    #[must_use]
    pub fn active_badges(&self) -> Vec<String> {
        let mut badges = Vec::new();
        if !self.search.is_empty() {
            badges.push(format!("Search: \"{}\"", self.search));
        }
        if let Some(category) = self.category.selected() {
            badges.push(format!("Category: {category}"));
        }
        badges
    }

    fn matches_with_needle(&self, needle: &str, item: &CatalogItem) -> bool {
        matches_search(needle, item)
            && self.category.admits(|category| *category == item.category)
            && self.price.admits(|bucket| bucket.contains(item.price))
            && self.rating.admits(|floor| floor.admits(item.rating))
    }
}

fn matches_search(needle: &str, item: &CatalogItem) -> bool {
    needle.is_empty()
        || item.title.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

#[derive(Debug, Serialize)]
pub struct FilterResult<'a> {
    pub count: usize,
    pub skills: Vec<&'a CatalogItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MentorSummary;

    fn item(id: &str, category: Category, price: f64, rating: f64) -> CatalogItem {
        CatalogItem {
            id: id.to_owned(),
            title: format!("Skill {id}"),
            category,
            description: "A description".to_owned(),
            price,
            duration: "1 hour".to_owned(),
            rating,
            review_count: 3,
            tags: vec!["Tag".to_owned()],
            mentor: MentorSummary {
                id: "m1".to_owned(),
                name: "Mentor".to_owned(),
                avatar: String::new(),
                title: String::new(),
            },
            students_count: 10,
            next_available: "Today".to_owned(),
        }
    }

    fn catalog() -> Vec<CatalogItem> {
        vec![
            item("1", Category::Programming, 75.0, 4.9),
            item("2", Category::Music, 45.0, 4.8),
            item("3", Category::Design, 60.0, 4.0),
            item("4", Category::Cooking, 50.0, 3.6),
            item("5", Category::Programming, 85.0, 3.4),
            item("6", Category::Photography, 120.0, 4.5),
        ]
    }

    fn ids(result: &FilterResult<'_>) -> Vec<String> {
        result.skills.iter().map(|item| item.id.clone()).collect()
    }

    #[test]
    fn unfiltered_returns_whole_catalog_in_order() {
        let items = catalog();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unfiltered());
        let result = criteria.apply(&items);
        assert_eq!(result.count, items.len());
        assert_eq!(ids(&result), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[test]
    fn rating_floor_is_inclusive() {
        let items = catalog();
        for floor in RatingFloor::ALL {
            let criteria = FilterCriteria {
                rating: Selector::Only(floor),
                ..FilterCriteria::default()
            };
            for item in &items {
                assert_eq!(criteria.matches(item), item.rating >= floor.threshold());
            }
        }
        assert!(RatingFloor::FourAndHalf.admits(4.5));
        assert!(!RatingFloor::FourAndHalf.admits(4.49));
    }

    #[test]
    fn price_boundaries() {
        assert!(PriceBucket::FiftyToSeventyFive.contains(50.0));
        assert!(!PriceBucket::UnderFifty.contains(50.0));
        // 75 sits in the lower bucket only
        assert!(PriceBucket::FiftyToSeventyFive.contains(75.0));
        assert!(!PriceBucket::SeventyFiveToHundred.contains(75.0));
        assert!(PriceBucket::SeventyFiveToHundred.contains(100.0));
        assert!(!PriceBucket::OverHundred.contains(100.0));
        assert!(PriceBucket::OverHundred.contains(100.01));
    }

    #[test]
    fn every_price_has_exactly_one_bucket() {
        for cents in 0..15_000_u32 {
            let price = f64::from(cents) / 100.0;
            let buckets = PriceBucket::ALL
                .into_iter()
                .filter(|bucket| bucket.contains(price))
                .count();
            assert_eq!(buckets, 1, "price {price}");
            assert!(PriceBucket::of(price).is_some());
        }
        assert_eq!(PriceBucket::of(f64::NAN), None);
        assert_eq!(PriceBucket::of(75.0), Some(PriceBucket::FiftyToSeventyFive));
        // open ended buckets take whatever validation lets through
        assert_eq!(PriceBucket::of(-1.0), Some(PriceBucket::UnderFifty));
        assert_eq!(PriceBucket::of(f64::INFINITY), Some(PriceBucket::OverHundred));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let mut items = catalog();
        items[0].title = "Full-Stack Web Development with React & Node.js".to_owned();
        items[1].description = "Learn basic CHORDS".to_owned();
        items[2].tags = vec!["Figma".to_owned()];

        let search = |text: &str| FilterCriteria {
            search: text.to_owned(),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&search("REACT").apply(&items)), vec!["1"]);
        assert_eq!(ids(&search("chords").apply(&items)), vec!["2"]);
        assert_eq!(ids(&search("fIgMa").apply(&items)), vec!["3"]);
        assert_eq!(search("nothing like this").apply(&items).count, 0);
    }

    #[test]
    fn exclusive_predicates_give_empty_result() {
        let items = catalog();
        let criteria = FilterCriteria {
            category: Selector::Only(Category::Music),
            price: Selector::Only(PriceBucket::OverHundred),
            ..FilterCriteria::default()
        };
        let result = criteria.apply(&items);
        assert_eq!(result.count, 0);
        assert!(result.skills.is_empty());
    }

    #[test]
    fn predicates_combine_with_and() {
        let items = catalog();
        let criteria = FilterCriteria {
            category: Selector::Only(Category::Programming),
            rating: Selector::Only(RatingFloor::Four),
            ..FilterCriteria::default()
        };
        assert_eq!(ids(&criteria.apply(&items)), vec!["1"]);
    }

    #[test]
    fn selectors_parse_labels() {
        assert_eq!("All".parse::<Selector<Category>>().unwrap(), Selector::All);
        assert_eq!(
            "Under $50".parse::<Selector<PriceBucket>>().unwrap(),
            Selector::Only(PriceBucket::UnderFifty)
        );
        assert_eq!(
            "3.5+ Stars".parse::<Selector<RatingFloor>>().unwrap(),
            Selector::Only(RatingFloor::ThreeAndHalf)
        );
        assert!("5 Stars".parse::<Selector<RatingFloor>>().is_err());
        assert_eq!(Selector::Only(PriceBucket::OverHundred).to_string(), "Over $100");
    }

    #[test]
    fn criteria_deserialize_from_json() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"q":"guitar","category":"Music","price":"Under $50"}"#,
        )
        .unwrap();
        assert_eq!(criteria.search, "guitar");
        assert_eq!(criteria.category, Selector::Only(Category::Music));
        assert_eq!(criteria.rating, Selector::All);
        assert!(serde_json::from_str::<FilterCriteria>(r#"{"category":"Knitting"}"#).is_err());
    }

    #[test]
    fn clear_resets_and_badges_follow_state() {
        let mut criteria = FilterCriteria {
            search: "react".to_owned(),
            category: Selector::Only(Category::Programming),
            price: Selector::Only(PriceBucket::UnderFifty),
            rating: Selector::All,
        };
        assert_eq!(
            criteria.active_badges(),
            vec!["Search: \"react\"", "Category: Programming"]
        );
        criteria.clear();
        assert!(criteria.is_unfiltered());
        assert!(criteria.active_badges().is_empty());
    }
}
