use http::{Response, StatusCode};
use serde::Deserialize;
use skillshare_hub_catalog::dashboard::DashboardTab;
use skillshare_hub_catalog::CatalogRepository;

use crate::either::Body;
use crate::error::AppError;
use crate::routes::json_response;

#[derive(Deserialize, Default)]
#[serde(default)]
struct TabQuery {
    tab: DashboardTab,
}

/// `GET /dashboard?tab=overview|learning|teaching`
pub fn show(catalog: &dyn CatalogRepository, query: &str) -> Result<Response<Body>, AppError> {
    let dashboard = catalog.dashboard().ok_or(AppError::NotFound)?;
    let TabQuery { tab } = serde_urlencoded::from_str(query)?;
    json_response(StatusCode::OK, &dashboard.view(tab))
}

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode};
    use skillshare_hub_catalog::CatalogBuilder;
    use skillshare_hub_config::Config;
    use skillshare_hub_database::MemoryUserStore;

    use crate::routes::tests::{app, call};
    use crate::App;

    #[tokio::test]
    async fn overview_by_default() {
        let (status, json) = call(&app(), Method::GET, "/dashboard", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tab"], "overview");
        assert_eq!(json["member"]["name"], "Alex Johnson");
        assert_eq!(json["member"]["stats"]["earnings"], 2150);
        assert_eq!(json["upcomingSessions"].as_array().unwrap().len(), 2);
        assert_eq!(json["recentActivity"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn tabs_narrow_the_sessions() {
        let app = app();
        let (_, json) = call(&app, Method::GET, "/dashboard?tab=learning", "").await;
        assert_eq!(json["upcomingSessions"].as_array().unwrap().len(), 1);
        assert_eq!(json["upcomingSessions"][0]["counterpart"], "Sarah Chen");

        let (_, json) = call(&app, Method::GET, "/dashboard?tab=teaching", "").await;
        assert_eq!(json["upcomingSessions"][0]["type"], "teaching");

        let (status, json) = call(&app, Method::GET, "/dashboard?tab=settings", "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().starts_with("Invalid query"));
    }

    #[tokio::test]
    async fn catalog_without_dashboard() {
        let app = App::new(
            &Config::default(),
            MemoryUserStore::new(),
            Box::new(CatalogBuilder::new().build().unwrap()),
        )
        .unwrap();
        let (status, _) = call(&app, Method::GET, "/dashboard", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
