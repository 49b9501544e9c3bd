use super::common::*;
use crate::portfolio::domain::{
    AssessmentId, ProjectFilter, ProjectId, ProjectPatch, SettingsPatch, DEFAULT_DISCLAIMER,
};
use crate::portfolio::repository::{PortfolioRepository, RepositoryError};
use crate::portfolio::{PortfolioError, PortfolioService};
use crate::scanner::{FineEstimate, PenaltyTier, RiskBucket, QUESTION_SET_VERSION, RULES_VERSION};
use std::sync::Arc;

#[test]
fn create_project_trims_name_and_rejects_blank() {
    let (service, _, _) = build_service();

    let summary = service
        .create_project(&owner(), project_draft("  Recruiting assistant  "))
        .expect("project created");
    assert_eq!(summary.project.name, "Recruiting assistant");
    assert_eq!(summary.assessment_count, 0);
    assert_eq!(summary.latest_bucket, None);

    match service.create_project(&owner(), project_draft("   ")) {
        Err(PortfolioError::InvalidInput(_)) => {}
        other => panic!("expected invalid input, got {other:?}"),
    }
}

#[test]
fn assessments_are_versioned_and_stamped() {
    let (service, _, _) = build_service();
    let project = service
        .create_project(&owner(), project_draft("Recruiting assistant"))
        .expect("project created")
        .project;

    let first = service
        .create_assessment(&owner(), assessment_draft(&project.id, hiring_answers()))
        .expect("first assessment");
    let second = service
        .create_assessment(&owner(), assessment_draft(&project.id, biometric_answers()))
        .expect("second assessment");

    assert_eq!(first.version, 1);
    assert_eq!(second.version, 2);
    assert_eq!(first.question_set_version, QUESTION_SET_VERSION);
    assert_eq!(first.rules_version, RULES_VERSION);
    assert_eq!(first.classification.bucket, RiskBucket::HighRisk);
    assert!(!first.roadmap.is_empty());
    assert!(first.estimator_output.is_none());

    let summary = service
        .get_project(&owner(), &project.id)
        .expect("project summary");
    assert_eq!(summary.assessment_count, 2);
    assert_eq!(summary.latest_bucket, Some(RiskBucket::Prohibited));

    let listed = service
        .list_assessments(&owner(), &project.id)
        .expect("assessments listed");
    assert_eq!(
        listed.iter().map(|a| a.version).collect::<Vec<_>>(),
        vec![2, 1]
    );
}

#[test]
fn estimator_inputs_are_completed_from_settings() {
    let (service, _, _) = build_service();
    let project = service
        .create_project(&owner(), project_draft("Face gate"))
        .expect("project created")
        .project;
    service
        .update_settings(
            &owner(),
            SettingsPatch {
                currency: Some("CHF".to_string()),
                ..SettingsPatch::default()
            },
        )
        .expect("settings updated");

    let mut draft = assessment_draft(&project.id, biometric_answers());
    draft.estimator_inputs = Some(crate::scanner::EstimatorInputs {
        turnover: Some(10_000_000.0),
        currency: None,
        tier_parameters: Default::default(),
    });

    let assessment = service
        .create_assessment(&owner(), draft)
        .expect("assessment created");

    let inputs = assessment.estimator_inputs.expect("inputs stored");
    assert_eq!(inputs.currency.as_deref(), Some("CHF"));
    assert_eq!(inputs.tier_parameters.len(), 3);
    match assessment.estimator_output {
        Some(FineEstimate::Exposure {
            min, max, tier, ..
        }) => {
            assert_eq!(tier, PenaltyTier::C);
            assert_eq!((min, max), (200_000.0, 600_000.0));
        }
        other => panic!("expected exposure, got {other:?}"),
    }
}

#[test]
fn duplicate_replays_answers_as_next_version() {
    let (service, _, _) = build_service();
    let project = service
        .create_project(&owner(), project_draft("Recruiting assistant"))
        .expect("project created")
        .project;
    let mut draft = assessment_draft(&project.id, hiring_answers());
    draft.estimator_inputs = Some(estimator_inputs(2_000_000.0));
    let original = service
        .create_assessment(&owner(), draft)
        .expect("assessment created");

    let copy = service
        .duplicate_assessment(&owner(), &original.id)
        .expect("duplicate created");

    assert_ne!(copy.id, original.id);
    assert_eq!(copy.version, 2);
    assert_eq!(copy.answers, original.answers);
    assert_eq!(copy.classification, original.classification);
    assert_eq!(copy.roadmap, original.roadmap);
    assert_eq!(copy.estimator_inputs, original.estimator_inputs);
    assert_eq!(copy.estimator_output, original.estimator_output);
}

#[test]
fn other_owners_cannot_see_projects_or_assessments() {
    let (service, _, _) = build_service();
    let project = service
        .create_project(&owner(), project_draft("Recruiting assistant"))
        .expect("project created")
        .project;
    let assessment = service
        .create_assessment(&owner(), assessment_draft(&project.id, hiring_answers()))
        .expect("assessment created");

    assert!(matches!(
        service.get_project(&other_owner(), &project.id),
        Err(PortfolioError::ProjectNotFound(_))
    ));
    assert!(matches!(
        service.get_assessment(&other_owner(), &assessment.id),
        Err(PortfolioError::AssessmentNotFound(_))
    ));
    assert!(matches!(
        service.create_assessment(&other_owner(), assessment_draft(&project.id, hiring_answers())),
        Err(PortfolioError::ProjectNotFound(_))
    ));
    assert!(service
        .list_projects(&other_owner(), &ProjectFilter::default())
        .expect("list succeeds")
        .is_empty());
}

#[test]
fn list_projects_filters_by_bucket_and_search() {
    let (service, _, _) = build_service();
    let hiring = service
        .create_project(&owner(), project_draft("Recruiting assistant"))
        .expect("project created")
        .project;
    let gate = service
        .create_project(&owner(), project_draft("Face gate"))
        .expect("project created")
        .project;
    service
        .create_project(&owner(), project_draft("Unassessed idea"))
        .expect("project created");
    service
        .create_assessment(&owner(), assessment_draft(&hiring.id, hiring_answers()))
        .expect("assessment");
    service
        .create_assessment(&owner(), assessment_draft(&gate.id, biometric_answers()))
        .expect("assessment");

    let all = service
        .list_projects(&owner(), &ProjectFilter::default())
        .expect("list");
    assert_eq!(all.len(), 3);

    let prohibited = service
        .list_projects(
            &owner(),
            &ProjectFilter {
                bucket: Some("Prohibited".to_string()),
                search: None,
            },
        )
        .expect("list");
    assert_eq!(prohibited.len(), 1);
    assert_eq!(prohibited[0].project.id, gate.id);

    let searched = service
        .list_projects(
            &owner(),
            &ProjectFilter {
                bucket: None,
                search: Some("recruit".to_string()),
            },
        )
        .expect("list");
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].assessment_count, 1);
}

#[test]
fn update_project_applies_partial_patch() {
    let (service, _, _) = build_service();
    let project = service
        .create_project(&owner(), project_draft("Chatbot"))
        .expect("project created")
        .project;
    service
        .create_assessment(&owner(), assessment_draft(&project.id, hiring_answers()))
        .expect("assessment");

    let updated = service
        .update_project(
            &owner(),
            &project.id,
            ProjectPatch {
                name: Some("Support chatbot".to_string()),
                org_name: None,
            },
        )
        .expect("updated");

    assert_eq!(updated.project.name, "Support chatbot");
    assert_eq!(updated.project.org_name.as_deref(), Some("Acme GmbH"));
    assert_eq!(updated.assessment_count, 1);
    assert_eq!(updated.latest_bucket, Some(RiskBucket::HighRisk));
}

#[test]
fn delete_project_cascades_to_assessments() {
    let (service, repository, _) = build_service();
    let project = service
        .create_project(&owner(), project_draft("Chatbot"))
        .expect("project created")
        .project;
    let assessment = service
        .create_assessment(&owner(), assessment_draft(&project.id, hiring_answers()))
        .expect("assessment");

    service
        .delete_project(&owner(), &project.id)
        .expect("project deleted");

    assert!(repository
        .fetch_project(&project.id)
        .expect("fetch")
        .is_none());
    assert!(repository
        .fetch_assessment(&assessment.id)
        .expect("fetch")
        .is_none());
    assert!(matches!(
        service.delete_project(&owner(), &project.id),
        Err(PortfolioError::ProjectNotFound(_))
    ));
}

#[test]
fn ensure_settings_is_idempotent() {
    let (service, _, settings_repository) = build_service();

    let first = service.ensure_settings(&owner()).expect("defaults created");
    let second = service.ensure_settings(&owner()).expect("defaults reused");

    assert_eq!(first, second);
    assert_eq!(settings_repository.len(), 1);
    assert_eq!(first.currency, "EUR");
    assert_eq!(first.penalty_tier_model, PenaltyTier::A);
    assert_eq!(first.disclaimer_text, DEFAULT_DISCLAIMER);
}

#[test]
fn update_settings_keeps_unpatched_fields_and_validates_turnover() {
    let (service, _, _) = build_service();

    let updated = service
        .update_settings(
            &owner(),
            SettingsPatch {
                default_turnover: Some(8_000_000.0),
                penalty_tier_model: Some(PenaltyTier::B),
                ..SettingsPatch::default()
            },
        )
        .expect("settings updated");
    assert_eq!(updated.default_turnover, Some(8_000_000.0));
    assert_eq!(updated.penalty_tier_model, PenaltyTier::B);
    assert_eq!(updated.currency, "EUR");
    assert_eq!(service.settings(&owner()).expect("settings"), updated);

    assert!(matches!(
        service.update_settings(
            &owner(),
            SettingsPatch {
                default_turnover: Some(-1.0),
                ..SettingsPatch::default()
            },
        ),
        Err(PortfolioError::InvalidInput(_))
    ));
}

#[test]
fn export_bundles_project_assessment_and_disclaimer() {
    let (service, _, _) = build_service();
    let project = service
        .create_project(&owner(), project_draft("Chatbot"))
        .expect("project created")
        .project;
    let assessment = service
        .create_assessment(&owner(), assessment_draft(&project.id, hiring_answers()))
        .expect("assessment");
    service
        .update_settings(
            &owner(),
            SettingsPatch {
                disclaimer_text: Some("Internal use only.".to_string()),
                ..SettingsPatch::default()
            },
        )
        .expect("settings updated");

    let export = service
        .export_assessment(&owner(), &assessment.id)
        .expect("export");

    assert_eq!(export.project, project);
    assert_eq!(export.assessment, assessment);
    assert_eq!(export.disclaimer, "Internal use only.");
}

#[test]
fn missing_records_surface_as_not_found() {
    let (service, _, _) = build_service();

    assert!(matches!(
        service.get_project(&owner(), &ProjectId("missing".to_string())),
        Err(PortfolioError::ProjectNotFound(_))
    ));
    assert!(matches!(
        service.duplicate_assessment(&owner(), &AssessmentId("missing".to_string())),
        Err(PortfolioError::AssessmentNotFound(_))
    ));
}

#[test]
fn conflicting_versions_propagate_repository_error() {
    let repository = Arc::new(ConflictRepository::default());
    let service = PortfolioService::new(repository, Arc::new(MemorySettings::default()));
    let project = service
        .create_project(&owner(), project_draft("Chatbot"))
        .expect("project created")
        .project;

    match service.create_assessment(&owner(), assessment_draft(&project.id, hiring_answers())) {
        Err(PortfolioError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn unavailable_repository_propagates() {
    let service = PortfolioService::new(
        Arc::new(UnavailableRepository),
        Arc::new(MemorySettings::default()),
    );

    match service.list_projects(&owner(), &ProjectFilter::default()) {
        Err(PortfolioError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected unavailable, got {other:?}"),
    }
}
