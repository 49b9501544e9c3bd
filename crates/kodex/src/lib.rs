//! KODEX: deterministic EU AI Act risk scanning for small teams.
//!
//! The [`scanner`] module holds the stateless core (question catalog, rule table, classifier,
//! roadmap generator and fine estimator). The [`portfolio`] module layers projects, versioned
//! assessments and per-owner settings on top of it behind repository traits.

pub mod config;
pub mod error;
pub mod portfolio;
pub mod scanner;
pub mod telemetry;
