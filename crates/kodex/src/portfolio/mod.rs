//! Projects, versioned assessments and per-owner settings layered over the scanner core.
//!
//! Storage sits behind [`PortfolioRepository`] and [`SettingsRepository`] so the service and
//! router can be exercised against in-memory adapters.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Assessment, AssessmentDraft, AssessmentExport, AssessmentId, OwnerId, Project, ProjectDraft,
    ProjectFilter, ProjectId, ProjectPatch, ProjectSummary, Settings, SettingsPatch,
    DEFAULT_DISCLAIMER,
};
pub use repository::{PortfolioRepository, RepositoryError, SettingsRepository};
pub use router::{portfolio_router, Owner, OWNER_HEADER};
pub use service::{PortfolioError, PortfolioService};
