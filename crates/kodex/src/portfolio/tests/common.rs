use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::portfolio::domain::{
    Assessment, AssessmentDraft, AssessmentId, OwnerId, Project, ProjectDraft, ProjectId, Settings,
};
use crate::portfolio::repository::{PortfolioRepository, RepositoryError, SettingsRepository};
use crate::portfolio::{portfolio_router, PortfolioService};
use crate::scanner::{default_tier_parameters, AnswerSet, EstimatorInputs};

pub(super) fn owner() -> OwnerId {
    OwnerId("owner-alpha".to_string())
}

pub(super) fn other_owner() -> OwnerId {
    OwnerId("owner-beta".to_string())
}

pub(super) fn project_draft(name: &str) -> ProjectDraft {
    ProjectDraft {
        name: name.to_string(),
        org_name: Some("Acme GmbH".to_string()),
    }
}

pub(super) fn hiring_answers() -> AnswerSet {
    AnswerSet::new()
        .with("q1_company_role", "integrator")
        .with("q2_deployment", "internal")
        .with("q3_domain", "hiring_hr")
        .with("q4_decision_impact", "significant_impact")
        .with("q5_data_types", "personal_nonsensitive")
        .with("q6_biometric", "no")
        .with("q7_safety_critical", "no")
        .with("q8_human_oversight", "human_reviews")
}

pub(super) fn biometric_answers() -> AnswerSet {
    AnswerSet::new()
        .with("q2_deployment", "external")
        .with("q6_biometric", "yes")
}

pub(super) fn estimator_inputs(turnover: f64) -> EstimatorInputs {
    EstimatorInputs {
        turnover: Some(turnover),
        currency: Some("EUR".to_string()),
        tier_parameters: default_tier_parameters(),
    }
}

pub(super) fn assessment_draft(project_id: &ProjectId, answers: AnswerSet) -> AssessmentDraft {
    AssessmentDraft {
        project_id: project_id.clone(),
        answers,
        estimator_inputs: None,
    }
}

pub(super) type MemoryService = PortfolioService<MemoryRepository, MemorySettings>;

pub(super) fn build_service() -> (MemoryService, Arc<MemoryRepository>, Arc<MemorySettings>) {
    let repository = Arc::new(MemoryRepository::default());
    let settings = Arc::new(MemorySettings::default());
    let service = PortfolioService::new(repository.clone(), settings.clone());
    (service, repository, settings)
}

pub(super) fn router_with_service(service: MemoryService) -> axum::Router {
    portfolio_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) projects: Arc<Mutex<HashMap<ProjectId, Project>>>,
    pub(super) assessments: Arc<Mutex<Vec<Assessment>>>,
}

impl PortfolioRepository for MemoryRepository {
    fn insert_project(&self, project: Project) -> Result<Project, RepositoryError> {
        let mut guard = self.projects.lock().expect("repository mutex poisoned");
        if guard.contains_key(&project.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(project.id.clone(), project.clone());
        Ok(project)
    }

    fn update_project(&self, project: Project) -> Result<(), RepositoryError> {
        let mut guard = self.projects.lock().expect("repository mutex poisoned");
        match guard.get_mut(&project.id) {
            Some(slot) => {
                *slot = project;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        let guard = self.projects.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn projects_for_owner(&self, owner: &OwnerId) -> Result<Vec<Project>, RepositoryError> {
        let guard = self.projects.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|project| &project.owner_id == owner)
            .cloned()
            .collect())
    }

    fn delete_project(&self, id: &ProjectId) -> Result<(), RepositoryError> {
        let mut guard = self.projects.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn insert_assessment(&self, assessment: Assessment) -> Result<Assessment, RepositoryError> {
        let mut guard = self.assessments.lock().expect("repository mutex poisoned");
        if guard.iter().any(|stored| {
            stored.project_id == assessment.project_id && stored.version == assessment.version
        }) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(assessment.clone());
        Ok(assessment)
    }

    fn fetch_assessment(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        let guard = self.assessments.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|assessment| &assessment.id == id).cloned())
    }

    fn assessments_for_project(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<Assessment>, RepositoryError> {
        let guard = self.assessments.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .filter(|assessment| &assessment.project_id == project)
            .cloned()
            .collect())
    }

    fn delete_assessments_for_project(
        &self,
        project: &ProjectId,
    ) -> Result<usize, RepositoryError> {
        let mut guard = self.assessments.lock().expect("repository mutex poisoned");
        let before = guard.len();
        guard.retain(|assessment| &assessment.project_id != project);
        Ok(before - guard.len())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySettings {
    pub(super) records: Arc<Mutex<HashMap<OwnerId, Settings>>>,
}

impl MemorySettings {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("settings mutex poisoned").len()
    }
}

impl SettingsRepository for MemorySettings {
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

/// Accepts projects but rejects every assessment as a duplicate version.
#[derive(Default)]
pub(super) struct ConflictRepository {
    inner: MemoryRepository,
}

impl PortfolioRepository for ConflictRepository {
    fn insert_project(&self, project: Project) -> Result<Project, RepositoryError> {
        self.inner.insert_project(project)
    }

    fn update_project(&self, project: Project) -> Result<(), RepositoryError> {
        self.inner.update_project(project)
    }

    fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        self.inner.fetch_project(id)
    }

    fn projects_for_owner(&self, owner: &OwnerId) -> Result<Vec<Project>, RepositoryError> {
        self.inner.projects_for_owner(owner)
    }

    fn delete_project(&self, id: &ProjectId) -> Result<(), RepositoryError> {
        self.inner.delete_project(id)
    }

    fn insert_assessment(&self, _assessment: Assessment) -> Result<Assessment, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch_assessment(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        self.inner.fetch_assessment(id)
    }

    fn assessments_for_project(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<Assessment>, RepositoryError> {
        self.inner.assessments_for_project(project)
    }

    fn delete_assessments_for_project(
        &self,
        project: &ProjectId,
    ) -> Result<usize, RepositoryError> {
        self.inner.delete_assessments_for_project(project)
    }
}

pub(super) struct UnavailableRepository;

impl PortfolioRepository for UnavailableRepository {
    fn insert_project(&self, _project: Project) -> Result<Project, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update_project(&self, _project: Project) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_project(&self, _id: &ProjectId) -> Result<Option<Project>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn projects_for_owner(&self, _owner: &OwnerId) -> Result<Vec<Project>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_project(&self, _id: &ProjectId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_assessment(&self, _assessment: Assessment) -> Result<Assessment, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_assessment(&self, _id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn assessments_for_project(
        &self,
        _project: &ProjectId,
    ) -> Result<Vec<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete_assessments_for_project(
        &self,
        _project: &ProjectId,
    ) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
