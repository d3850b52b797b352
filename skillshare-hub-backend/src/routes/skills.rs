use http::{Response, StatusCode};
use skillshare_hub_catalog::{CatalogRepository, FilterCriteria};
use tracing::debug;

use crate::either::Body;
use crate::error::AppError;
use crate::routes::json_response;

/// `GET /skills?q=&category=&price=&rating=`
pub fn list(catalog: &dyn CatalogRepository, query: &str) -> Result<Response<Body>, AppError> {
    let criteria: FilterCriteria = serde_urlencoded::from_str(query)?;
    let result = criteria.apply(catalog.skills());
    debug!(count = result.count, badges = ?criteria.active_badges(), "filtered skills");
    json_response(StatusCode::OK, &result)
}
