//! Domain types and pure logic behind the marketplace pages: skill
//! listings and their filters, mentor calendars, the inbox, the member
//! dashboard and session lifecycle.

pub mod conversations;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod mentor;
pub mod model;
pub mod repository;
pub mod session;
pub mod slots;

pub use error::CatalogError;
pub use filter::{FilterCriteria, FilterResult, PriceBucket, RatingFloor, Selector};
pub use model::{CatalogItem, Category, MentorSummary};
pub use repository::{CatalogBuilder, CatalogRepository, InMemoryCatalog};
