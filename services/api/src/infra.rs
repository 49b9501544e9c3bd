use axum::http::HeaderValue;
use kodex::config::CorsConfig;
use kodex::portfolio::domain::{
    Assessment, AssessmentId, OwnerId, Project, ProjectId, Settings,
};
use kodex::portfolio::repository::{PortfolioRepository, RepositoryError, SettingsRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryPortfolioRepository {
    projects: Arc<Mutex<HashMap<ProjectId, Project>>>,
    assessments: Arc<Mutex<HashMap<AssessmentId, Assessment>>>,
}

impl PortfolioRepository for InMemoryPortfolioRepository {
    fn insert_project(&self, project: Project) -> Result<Project, RepositoryError> {
        let mut guard = self.projects.lock().expect("project mutex poisoned");
        if guard.contains_key(&project.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    fn update_project(&self, project: Project) -> Result<(), RepositoryError> {
        let mut guard = self.projects.lock().expect("project mutex poisoned");
        if guard.contains_key(&project.id) {
            guard.insert(project.id.clone(), project);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        let guard = self.projects.lock().expect("project mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn projects_for_owner(&self, owner: &OwnerId) -> Result<Vec<Project>, RepositoryError> {
        let guard = self.projects.lock().expect("project mutex poisoned");
        Ok(guard
            .values()
            .filter(|project| &project.owner_id == owner)
            .cloned()
            .collect())
    }

    fn delete_project(&self, id: &ProjectId) -> Result<(), RepositoryError> {
        let mut guard = self.projects.lock().expect("project mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn insert_assessment(&self, assessment: Assessment) -> Result<Assessment, RepositoryError> {
        let mut guard = self.assessments.lock().expect("assessment mutex poisoned");
        let taken = guard.values().any(|stored| {
            stored.project_id == assessment.project_id && stored.version == assessment.version
        });
        if taken || guard.contains_key(&assessment.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(assessment.id.clone(), assessment.clone());
        Ok(assessment)
    }

    fn fetch_assessment(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let guard = self.assessments.lock().expect("assessment mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn assessments_for_project(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<Assessment>, RepositoryError> {
        let guard = self.assessments.lock().expect("assessment mutex poisoned");
        Ok(guard
            .values()
            .filter(|assessment| &assessment.project_id == project)
            .cloned()
            .collect())
    }

    fn delete_assessments_for_project(
        &self,
        project: &ProjectId,
    ) -> Result<usize, RepositoryError> {
        let mut guard = self.assessments.lock().expect("assessment mutex poisoned");
        let before = guard.len();
        guard.retain(|_, assessment| &assessment.project_id != project);
        Ok(before - guard.len())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySettingsRepository {
    records: Arc<Mutex<HashMap<OwnerId, Settings>>>,
}

impl SettingsRepository for InMemorySettingsRepository {
    fn fetch_settings(&self, owner: &OwnerId) -> Result<Option<Settings>, RepositoryError> {
        let guard = self.records.lock().expect("settings mutex poisoned");
        Ok(guard.get(owner).cloned())
    }

    fn insert_if_absent(&self, settings: Settings) -> Result<Settings, RepositoryError> {
        let mut guard = self.records.lock().expect("settings mutex poisoned");
        Ok(guard
            .entry(settings.owner_id.clone())
            .or_insert(settings)
            .clone())
    }

    fn save_settings(&self, settings: Settings) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("settings mutex poisoned");
        guard.insert(settings.owner_id.clone(), settings);
        Ok(())
    }
}

pub(crate) fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.is_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
