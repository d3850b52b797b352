use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("catalog item without an id")]
    MissingId,
    #[error("item {id} has an invalid price {price}")]
    InvalidPrice { id: String, price: f64 },
    #[error("item {id} has a rating {rating} outside of 0 to 5")]
    InvalidRating { id: String, rating: f64 },
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: String },
    #[error("unknown {dimension} \"{value}\"")]
    UnknownSelector {
        dimension: &'static str,
        value: String,
    },
    #[error("invalid date \"{0}\", expected YYYY-MM-DD")]
    InvalidDate(String),
}
