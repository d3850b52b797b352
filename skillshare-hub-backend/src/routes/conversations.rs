use http::{Response, StatusCode};
use serde::Deserialize;
use skillshare_hub_catalog::conversations::search_conversations;
use skillshare_hub_catalog::CatalogRepository;

use crate::either::Body;
use crate::error::AppError;
use crate::routes::json_response;

#[derive(Deserialize, Default)]
#[serde(default)]
struct SearchQuery {
    q: String,
}

pub fn list(catalog: &dyn CatalogRepository, query: &str) -> Result<Response<Body>, AppError> {
    let SearchQuery { q } = serde_urlencoded::from_str(query)?;
    json_response(StatusCode::OK, &search_conversations(&q, catalog.conversations()))
}

pub fn messages(catalog: &dyn CatalogRepository, id: &str) -> Result<Response<Body>, AppError> {
    let thread = catalog.messages(id).ok_or(AppError::NotFound)?;
    json_response(StatusCode::OK, thread)
}
