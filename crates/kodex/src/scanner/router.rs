use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::classifier::classify;
use super::domain::AnswerSet;
use super::estimator::{estimate_fine, EstimatorInputs, TierTable};
use super::questions::QuestionCatalog;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub answers_json: AnswerSet,
}

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub classification_bucket: String,
    #[serde(default)]
    pub turnover: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub tier_parameters: TierTable,
}

/// Stateless scanner endpoints: questionnaire, classification and fine estimate.
pub fn scanner_router() -> Router {
    Router::new()
        .route("/api/questions", get(questions_handler))
        .route("/api/classify", post(classify_handler))
        .route("/api/estimate", post(estimate_handler))
}

pub(crate) async fn questions_handler() -> Response {
    let catalog = QuestionCatalog::standard();
    let payload = json!({
        "questions": catalog.questions(),
        "steps": catalog.steps(),
        "version": catalog.version(),
    });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn classify_handler(Json(request): Json<ClassifyRequest>) -> Response {
    let classification = classify(&request.answers_json);
    info!(
        bucket = classification.bucket.label(),
        confidence = classification.confidence.label(),
        rule = classification.winning_rule_id().unwrap_or("none"),
        "classified answers"
    );
    (StatusCode::OK, Json(classification)).into_response()
}

pub(crate) async fn estimate_handler(Json(request): Json<EstimateRequest>) -> Response {
    let inputs = EstimatorInputs {
        turnover: request.turnover,
        currency: request.currency,
        tier_parameters: request.tier_parameters,
    };
    let estimate = estimate_fine(&request.classification_bucket, &inputs);
    (StatusCode::OK, Json(estimate)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn post_json(uri: &str, payload: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn questions_route_lists_catalog_and_version() {
        let response = scanner_router()
            .oneshot(
                Request::get("/api/questions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["version"], "1.0.0");
        assert_eq!(body["questions"].as_array().map(Vec::len), Some(12));
        assert_eq!(body["questions"][0]["id"], "q1_company_role");
        assert_eq!(body["questions"][0]["type"], "single");
        assert!(body["steps"].as_array().is_some_and(|steps| !steps.is_empty()));
    }

    #[tokio::test]
    async fn classify_route_returns_classification() {
        let response = scanner_router()
            .oneshot(post_json(
                "/api/classify",
                json!({
                    "answers_json": {
                        "q3_domain": "hiring_hr",
                        "q4_decision_impact": "significant_impact",
                        "q11_use_case": null
                    }
                }),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["bucket"], "High-risk");
        assert_eq!(body["decisive_factors"][0]["ruleId"], "R003");
        assert_eq!(body["rule_trace"].as_array().map(Vec::len), Some(13));
    }

    #[tokio::test]
    async fn classify_route_rejects_missing_answers() {
        let response = scanner_router()
            .oneshot(post_json("/api/classify", json!({ "answers": {} })))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn estimate_route_applies_tier_parameters() {
        let response = scanner_router()
            .oneshot(post_json(
                "/api/estimate",
                json!({
                    "classification_bucket": "Prohibited",
                    "turnover": 10_000_000.0,
                    "currency": "EUR",
                    "tier_parameters": {
                        "C": {"min_percent": 2, "max_percent": 6, "fixed_max": 35_000_000}
                    }
                }),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["min"], 200_000.0);
        assert_eq!(body["max"], 600_000.0);
        assert_eq!(body["tier"], "C");
    }

    #[tokio::test]
    async fn estimate_route_reports_missing_turnover() {
        let response = scanner_router()
            .oneshot(post_json(
                "/api/estimate",
                json!({
                    "classification_bucket": "High-risk",
                    "turnover": 0,
                    "currency": "EUR",
                    "tier_parameters": {}
                }),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["error"], "Set turnover to run simulation");
        assert!(body["min"].is_null());
    }

    #[tokio::test]
    async fn estimate_route_without_turnover_returns_error_result() {
        let response = scanner_router()
            .oneshot(post_json(
                "/api/estimate",
                json!({ "classification_bucket": "Prohibited" }),
            ))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["error"], "Set turnover to run simulation");
    }
}
