use http::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use skillshare_hub_catalog::session::{Feedback, MentoringSession, SessionActions};
use skillshare_hub_catalog::CatalogRepository;
use tracing::info;

use crate::either::Body;
use crate::error::AppError;
use crate::routes::json_response;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionView<'a> {
    #[serde(flatten)]
    session: &'a MentoringSession,
    status_label: &'static str,
    actions: SessionActions,
}

pub fn show(catalog: &dyn CatalogRepository, id: &str) -> Result<Response<Body>, AppError> {
    let session = catalog.session(id).ok_or(AppError::NotFound)?;
    json_response(
        StatusCode::OK,
        &SessionView {
            session,
            status_label: session.status.label(),
            actions: session.actions(),
        },
    )
}

pub fn messages(catalog: &dyn CatalogRepository, id: &str) -> Result<Response<Body>, AppError> {
    let chat = catalog.session_messages(id).ok_or(AppError::NotFound)?;
    json_response(StatusCode::OK, chat)
}

/// Body of `POST /sessions/{id}/feedback`.
#[derive(Deserialize)]
struct FeedbackForm {
    rating: u8,
    #[serde(default)]
    feedback: String,
}

#[derive(Serialize)]
struct FeedbackReceived<'a> {
    message: &'static str,
    feedback: &'a Feedback,
}

pub fn feedback(
    catalog: &dyn CatalogRepository,
    id: &str,
    body: &[u8],
) -> Result<Response<Body>, AppError> {
    let session = catalog.session(id).ok_or(AppError::NotFound)?;
    let form: FeedbackForm = serde_json::from_slice(body).map_err(AppError::InvalidJson)?;
    let feedback = session.leave_feedback(form.rating, &form.feedback)?;
    info!(session = id, rating = feedback.rating(), "received feedback");
    json_response(
        StatusCode::OK,
        &FeedbackReceived {
            message: "Thank you for your feedback",
            feedback: &feedback,
        },
    )
}

#[cfg(test)]
mod tests {
    use http::{Method, StatusCode};
    use skillshare_hub_catalog::fixtures::demo_session;
    use skillshare_hub_catalog::session::SessionStatus;
    use skillshare_hub_catalog::CatalogBuilder;
    use skillshare_hub_config::Config;
    use skillshare_hub_database::MemoryUserStore;

    use crate::routes::tests::{app, call};
    use crate::App;

    fn completed_session_app() -> App<MemoryUserStore> {
        let mut session = demo_session().unwrap();
        session.status = SessionStatus::Completed;
        App::new(
            &Config::default(),
            MemoryUserStore::new(),
            Box::new(
                CatalogBuilder::new()
                    .session(session, Vec::new())
                    .build()
                    .unwrap(),
            ),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn upcoming_session_view() {
        let app = app();
        let (status, json) = call(&app, Method::GET, "/sessions/session-123", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "upcoming");
        assert_eq!(json["statusLabel"], "Upcoming");
        assert_eq!(json["startsAt"], "2024-01-20T14:00:00");
        assert_eq!(
            json["actions"],
            serde_json::json!({
                "canReschedule": true,
                "canCancel": true,
                "canLeaveFeedback": false,
            })
        );
        assert_eq!(json["materials"][0]["type"], "pdf");
    }

    #[tokio::test]
    async fn unknown_session() {
        let app = app();
        for (method, uri) in [
            (Method::GET, "/sessions/nope"),
            (Method::GET, "/sessions/nope/messages"),
            (Method::POST, "/sessions/nope/feedback"),
        ] {
            let (status, json) = call(&app, method, uri, r#"{"rating":5}"#).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(json["error"], "Not found");
        }
    }

    #[tokio::test]
    async fn session_chat() {
        let (status, json) =
            call(&app(), Method::GET, "/sessions/session-123/messages", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().unwrap().len(), 5);
        assert_eq!(json[0]["sender"], "Sarah Chen");
        assert_eq!(json[1]["isOwn"], true);

        let (status, json) = call(
            &completed_session_app(),
            Method::GET,
            "/sessions/session-123/messages",
            "",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!([]));
    }

    #[tokio::test]
    async fn feedback_on_upcoming_session_is_refused() {
        let (status, json) = call(
            &app(),
            Method::POST,
            "/sessions/session-123/feedback",
            r#"{"rating":5,"feedback":"Great"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["error"],
            "Feedback can only be left for completed sessions."
        );
    }

    #[tokio::test]
    async fn feedback_on_completed_session() {
        let app = completed_session_app();
        let (status, json) = call(
            &app,
            Method::POST,
            "/sessions/session-123/feedback",
            r#"{"rating":5,"feedback":" Loved the custom hooks part. "}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!({
                "message": "Thank you for your feedback",
                "feedback": {
                    "sessionId": "session-123",
                    "rating": 5,
                    "comment": "Loved the custom hooks part.",
                },
            })
        );

        let (status, json) = call(
            &app,
            Method::POST,
            "/sessions/session-123/feedback",
            r#"{"rating":0}"#,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Please choose a rating from 1 to 5.");
    }
}
