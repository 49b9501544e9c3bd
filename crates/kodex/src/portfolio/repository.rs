use super::domain::{Assessment, AssessmentId, OwnerId, Project, ProjectId, Settings};

/// Storage abstraction for projects and their assessments.
pub trait PortfolioRepository: Send + Sync {
    fn insert_project(&self, project: Project) -> Result<Project, RepositoryError>;
    /// Fails with `NotFound` when the project does not exist.
    fn update_project(&self, project: Project) -> Result<(), RepositoryError>;
    fn fetch_project(&self, id: &ProjectId) -> Result<Option<Project>, RepositoryError>;
    fn projects_for_owner(&self, owner: &OwnerId) -> Result<Vec<Project>, RepositoryError>;
    fn delete_project(&self, id: &ProjectId) -> Result<(), RepositoryError>;

    /// Fails with `Conflict` when the project already has an assessment with the same version.
    fn insert_assessment(&self, assessment: Assessment) -> Result<Assessment, RepositoryError>;
    fn fetch_assessment(&self, id: &AssessmentId) -> Result<Option<Assessment>, RepositoryError>;
    fn assessments_for_project(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<Assessment>, RepositoryError>;
    /// Returns how many assessments were removed.
    fn delete_assessments_for_project(&self, project: &ProjectId)
        -> Result<usize, RepositoryError>;
}

/// Storage abstraction for per-owner settings.
pub trait SettingsRepository: Send + Sync {
    fn fetch_settings(&self, owner: &OwnerId) -> Result<Option<Settings>, RepositoryError>;
    /// Stores `settings` unless the owner already has a record; returns whichever is stored.
    fn insert_if_absent(&self, settings: Settings) -> Result<Settings, RepositoryError>;
    fn save_settings(&self, settings: Settings) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
