use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::{
    AssessmentDraft, AssessmentId, OwnerId, ProjectDraft, ProjectFilter, ProjectId, ProjectPatch,
    SettingsPatch,
};
use super::repository::{PortfolioRepository, RepositoryError, SettingsRepository};
use super::service::{PortfolioError, PortfolioService};

/// Header carrying the caller identity set by the upstream gateway.
pub const OWNER_HEADER: &str = "x-owner-id";

/// Extracts the calling owner; requests without one are rejected with 401.
#[derive(Debug, Clone)]
pub struct Owner(pub OwnerId);

#[axum::async_trait]
impl<St> FromRequestParts<St> for Owner
where
    St: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
        let owner = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match owner {
            Some(owner) => Ok(Owner(OwnerId(owner.to_string()))),
            None => {
                let payload = json!({ "error": "Not authenticated" });
                Err((StatusCode::UNAUTHORIZED, Json(payload)).into_response())
            }
        }
    }
}

type SharedService<P, S> = State<Arc<PortfolioService<P, S>>>;

/// Router builder exposing project, assessment, settings and export endpoints.
pub fn portfolio_router<P, S>(service: Arc<PortfolioService<P, S>>) -> Router
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    Router::new()
        .route(
            "/api/projects",
            post(create_project_handler::<P, S>).get(list_projects_handler::<P, S>),
        )
        .route(
            "/api/projects/:project_id",
            get(get_project_handler::<P, S>)
                .put(update_project_handler::<P, S>)
                .delete(delete_project_handler::<P, S>),
        )
        .route(
            "/api/projects/:project_id/assessments",
            get(list_assessments_handler::<P, S>),
        )
        .route("/api/assessments", post(create_assessment_handler::<P, S>))
        .route(
            "/api/assessments/:assessment_id",
            get(get_assessment_handler::<P, S>),
        )
        .route(
            "/api/assessments/:assessment_id/duplicate",
            post(duplicate_assessment_handler::<P, S>),
        )
        .route(
            "/api/settings",
            get(get_settings_handler::<P, S>).put(update_settings_handler::<P, S>),
        )
        .route(
            "/api/export/:assessment_id",
            get(export_handler::<P, S>),
        )
        .with_state(service)
}

fn respond<T: serde::Serialize>(status: StatusCode, result: Result<T, PortfolioError>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn error_response(error: PortfolioError) -> Response {
    let (status, message) = match &error {
        PortfolioError::ProjectNotFound(_) => (StatusCode::NOT_FOUND, "Project not found".to_string()),
        PortfolioError::AssessmentNotFound(_) => {
            (StatusCode::NOT_FOUND, "Assessment not found".to_string())
        }
        PortfolioError::InvalidInput(reason) => (StatusCode::UNPROCESSABLE_ENTITY, reason.clone()),
        PortfolioError::Repository(RepositoryError::Conflict) => (
            StatusCode::CONFLICT,
            "assessment version already exists".to_string(),
        ),
        PortfolioError::Repository(other) => {
            warn!(error = %other, "portfolio repository failure");
            (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
        }
    };

    (status, Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn create_project_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Json(draft): Json<ProjectDraft>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(StatusCode::OK, service.create_project(&owner, draft))
}

pub(crate) async fn list_projects_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Query(filter): Query<ProjectFilter>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(StatusCode::OK, service.list_projects(&owner, &filter))
}

pub(crate) async fn get_project_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Path(project_id): Path<String>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.get_project(&owner, &ProjectId(project_id)),
    )
}

pub(crate) async fn update_project_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Path(project_id): Path<String>,
    Json(patch): Json<ProjectPatch>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update_project(&owner, &ProjectId(project_id), patch),
    )
}

pub(crate) async fn delete_project_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Path(project_id): Path<String>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    let result = service
        .delete_project(&owner, &ProjectId(project_id))
        .map(|()| json!({ "message": "Project deleted" }));
    respond(StatusCode::OK, result)
}

pub(crate) async fn list_assessments_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Path(project_id): Path<String>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.list_assessments(&owner, &ProjectId(project_id)),
    )
}

pub(crate) async fn create_assessment_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Json(draft): Json<AssessmentDraft>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(StatusCode::OK, service.create_assessment(&owner, draft))
}

pub(crate) async fn get_assessment_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Path(assessment_id): Path<String>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.get_assessment(&owner, &AssessmentId(assessment_id)),
    )
}

pub(crate) async fn duplicate_assessment_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Path(assessment_id): Path<String>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.duplicate_assessment(&owner, &AssessmentId(assessment_id)),
    )
}

pub(crate) async fn get_settings_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(StatusCode::OK, service.settings(&owner))
}

pub(crate) async fn update_settings_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Json(patch): Json<SettingsPatch>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(StatusCode::OK, service.update_settings(&owner, patch))
}

pub(crate) async fn export_handler<P, S>(
    State(service): SharedService<P, S>,
    Owner(owner): Owner,
    Path(assessment_id): Path<String>,
) -> Response
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.export_assessment(&owner, &AssessmentId(assessment_id)),
    )
}
