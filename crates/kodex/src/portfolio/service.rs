use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::domain::{
    Assessment, AssessmentDraft, AssessmentExport, AssessmentId, OwnerId, Project, ProjectDraft,
    ProjectFilter, ProjectId, ProjectPatch, ProjectSummary, Settings, SettingsPatch,
};
use super::repository::{PortfolioRepository, RepositoryError, SettingsRepository};
use crate::scanner::{self, QUESTION_SET_VERSION, RULES_VERSION};

/// Service composing project storage, owner settings and the scanner core.
pub struct PortfolioService<P, S> {
    repository: Arc<P>,
    settings: Arc<S>,
}

impl<P, S> PortfolioService<P, S>
where
    P: PortfolioRepository + 'static,
    S: SettingsRepository + 'static,
{
    pub fn new(repository: Arc<P>, settings: Arc<S>) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub fn create_project(
        &self,
        owner: &OwnerId,
        draft: ProjectDraft,
    ) -> Result<ProjectSummary, PortfolioError> {
        let name = validated_name(&draft.name)?;
        let project = Project {
            id: ProjectId::generate(),
            owner_id: owner.clone(),
            name,
            org_name: draft.org_name,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert_project(project)?;
        info!(project = %stored.id, owner = %owner, "project created");
        Ok(ProjectSummary {
            project: stored,
            assessment_count: 0,
            latest_bucket: None,
        })
    }

    /// Owner's projects in creation order, narrowed by `filter`.
    pub fn list_projects(
        &self,
        owner: &OwnerId,
        filter: &ProjectFilter,
    ) -> Result<Vec<ProjectSummary>, PortfolioError> {
        let mut projects = self.repository.projects_for_owner(owner)?;
        projects.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.id.cmp(&right.id))
        });

        let mut summaries = Vec::with_capacity(projects.len());
        for project in projects {
            let summary = self.summarize(project)?;
            if filter.matches(&summary) {
                summaries.push(summary);
            }
        }
        Ok(summaries)
    }

    pub fn get_project(
        &self,
        owner: &OwnerId,
        id: &ProjectId,
    ) -> Result<ProjectSummary, PortfolioError> {
        let project = self.owned_project(owner, id)?;
        self.summarize(project)
    }

    pub fn update_project(
        &self,
        owner: &OwnerId,
        id: &ProjectId,
        patch: ProjectPatch,
    ) -> Result<ProjectSummary, PortfolioError> {
        let mut project = self.owned_project(owner, id)?;

        if !patch.is_empty() {
            if let Some(name) = patch.name {
                project.name = validated_name(&name)?;
            }
            if let Some(org_name) = patch.org_name {
                project.org_name = Some(org_name);
            }
            self.repository.update_project(project.clone())?;
            info!(project = %project.id, "project updated");
        }

        self.summarize(project)
    }

    /// Removes the project together with every assessment recorded against it.
    pub fn delete_project(&self, owner: &OwnerId, id: &ProjectId) -> Result<(), PortfolioError> {
        let project = self.owned_project(owner, id)?;
        let removed = self.repository.delete_assessments_for_project(&project.id)?;
        self.repository.delete_project(&project.id)?;
        info!(project = %project.id, assessments = removed, "project deleted");
        Ok(())
    }

    /// Classify the answers, derive the roadmap and, when inputs are supplied, the fine
    /// estimate, then store the result as the project's next version.
    pub fn create_assessment(
        &self,
        owner: &OwnerId,
        draft: AssessmentDraft,
    ) -> Result<Assessment, PortfolioError> {
        let project = self.owned_project(owner, &draft.project_id)?;
        let existing = self.repository.assessments_for_project(&project.id)?;
        let version = u32::try_from(existing.len() + 1)
            .map_err(|_| PortfolioError::InvalidInput("too many assessment versions".to_string()))?;

        let estimator_inputs = match draft.estimator_inputs {
            Some(inputs) => Some(self.ensure_settings(owner)?.complete(inputs)),
            None => None,
        };
        let report = scanner::scan(&draft.answers, estimator_inputs.as_ref());

        let assessment = Assessment {
            id: AssessmentId::generate(),
            project_id: project.id,
            version,
            question_set_version: QUESTION_SET_VERSION.to_string(),
            rules_version: RULES_VERSION.to_string(),
            answers: draft.answers,
            classification: report.classification,
            estimator_inputs,
            estimator_output: report.estimate,
            roadmap: report.roadmap,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert_assessment(assessment)?;
        info!(
            assessment = %stored.id,
            project = %stored.project_id,
            version = stored.version,
            bucket = stored.classification.bucket.label(),
            confidence = stored.classification.confidence.label(),
            "assessment recorded"
        );
        Ok(stored)
    }

    pub fn get_assessment(
        &self,
        owner: &OwnerId,
        id: &AssessmentId,
    ) -> Result<Assessment, PortfolioError> {
        self.owned_assessment(owner, id).map(|(_, assessment)| assessment)
    }

    /// Newest version first.
    pub fn list_assessments(
        &self,
        owner: &OwnerId,
        project_id: &ProjectId,
    ) -> Result<Vec<Assessment>, PortfolioError> {
        let project = self.owned_project(owner, project_id)?;
        let mut assessments = self.repository.assessments_for_project(&project.id)?;
        assessments.sort_by(|left, right| right.version.cmp(&left.version));
        Ok(assessments)
    }

    /// Re-run a stored assessment's answers and estimator inputs as a new version.
    pub fn duplicate_assessment(
        &self,
        owner: &OwnerId,
        id: &AssessmentId,
    ) -> Result<Assessment, PortfolioError> {
        let (_, source) = self.owned_assessment(owner, id)?;
        self.create_assessment(
            owner,
            AssessmentDraft {
                project_id: source.project_id,
                answers: source.answers,
                estimator_inputs: source.estimator_inputs,
            },
        )
    }

    /// Create the owner's default settings unless they already exist. Safe to call repeatedly.
    pub fn ensure_settings(&self, owner: &OwnerId) -> Result<Settings, PortfolioError> {
        if let Some(settings) = self.settings.fetch_settings(owner)? {
            return Ok(settings);
        }
        let settings = self
            .settings
            .insert_if_absent(Settings::defaults(owner.clone()))?;
        info!(owner = %owner, "default settings initialized");
        Ok(settings)
    }

    pub fn settings(&self, owner: &OwnerId) -> Result<Settings, PortfolioError> {
        self.ensure_settings(owner)
    }

    pub fn update_settings(
        &self,
        owner: &OwnerId,
        patch: SettingsPatch,
    ) -> Result<Settings, PortfolioError> {
        let mut settings = self.ensure_settings(owner)?;
        if let Some(turnover) = patch.default_turnover {
            if !turnover.is_finite() || turnover < 0.0 {
                return Err(PortfolioError::InvalidInput(
                    "default_turnover must be a non-negative number".to_string(),
                ));
            }
        }
        settings.apply(patch);
        self.settings.save_settings(settings.clone())?;
        Ok(settings)
    }

    pub fn export_assessment(
        &self,
        owner: &OwnerId,
        id: &AssessmentId,
    ) -> Result<AssessmentExport, PortfolioError> {
        let (project, assessment) = self.owned_assessment(owner, id)?;
        let settings = self.ensure_settings(owner)?;
        Ok(AssessmentExport {
            project,
            assessment,
            disclaimer: settings.disclaimer_text,
        })
    }

    fn owned_project(&self, owner: &OwnerId, id: &ProjectId) -> Result<Project, PortfolioError> {
        match self.repository.fetch_project(id)? {
            Some(project) if &project.owner_id == owner => Ok(project),
            _ => Err(PortfolioError::ProjectNotFound(id.clone())),
        }
    }

    /// Assessments of other owners' projects are reported as missing.
    fn owned_assessment(
        &self,
        owner: &OwnerId,
        id: &AssessmentId,
    ) -> Result<(Project, Assessment), PortfolioError> {
        let assessment = self
            .repository
            .fetch_assessment(id)?
            .ok_or_else(|| PortfolioError::AssessmentNotFound(id.clone()))?;

        match self.repository.fetch_project(&assessment.project_id)? {
            Some(project) if &project.owner_id == owner => Ok((project, assessment)),
            _ => Err(PortfolioError::AssessmentNotFound(id.clone())),
        }
    }

    fn summarize(&self, project: Project) -> Result<ProjectSummary, PortfolioError> {
        let assessments = self.repository.assessments_for_project(&project.id)?;
        let latest_bucket = assessments
            .iter()
            .max_by_key(|assessment| assessment.version)
            .map(|assessment| assessment.classification.bucket);

        Ok(ProjectSummary {
            project,
            assessment_count: assessments.len(),
            latest_bucket,
        })
    }
}

fn validated_name(name: &str) -> Result<String, PortfolioError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PortfolioError::InvalidInput(
            "project name must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Error raised by the portfolio service.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioError {
    #[error("project {0} not found")]
    ProjectNotFound(ProjectId),
    #[error("assessment {0} not found")]
    AssessmentNotFound(AssessmentId),
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
