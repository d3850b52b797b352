use http::{Response, StatusCode};
use serde::Deserialize;
use skillshare_hub_catalog::slots::{parse_date_key, select_slots};
use skillshare_hub_catalog::CatalogRepository;

use crate::either::Body;
use crate::error::AppError;
use crate::routes::json_response;

#[derive(Deserialize)]
struct SlotsQuery {
    date: String,
}

pub fn profile(catalog: &dyn CatalogRepository, id: &str) -> Result<Response<Body>, AppError> {
    let mentor = catalog.mentor(id).ok_or(AppError::NotFound)?;
    json_response(StatusCode::OK, mentor)
}

/// `GET /mentors/{id}/slots?date=YYYY-MM-DD`
pub fn slots(
    catalog: &dyn CatalogRepository,
    id: &str,
    query: &str,
) -> Result<Response<Body>, AppError> {
    let slots = catalog.slots(id).ok_or(AppError::NotFound)?;
    let SlotsQuery { date } = serde_urlencoded::from_str(query)?;
    let selection = select_slots(parse_date_key(&date)?, slots);
    json_response(StatusCode::OK, &selection)
}
