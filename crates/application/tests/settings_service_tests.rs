//! Tests for settings service
//!
//! Tests lazy creation of the default configuration, admin checks, and
//! weight sum enforcement on update.

use peer_grading_application::{
    ApplicationError, ServiceContext, ServiceEvent, SettingsRepositoryPort, SettingsService,
    UpdateSettingsRequest,
};
use peer_grading_domain::criteria::{CriteriaConfig, Criterion};
use peer_grading_testing::{builders::*, mocks::*};
use std::sync::Arc;

fn service() -> (
    Arc<InMemorySettingsRepository>,
    Arc<MockEventPublisher>,
    SettingsService<InMemorySettingsRepository, MockEventPublisher>,
) {
    let repository = Arc::new(InMemorySettingsRepository::new());
    let publisher = Arc::new(MockEventPublisher::new());
    let service = SettingsService::new(Arc::clone(&repository), Arc::clone(&publisher));
    (repository, publisher, service)
}

fn admin() -> ServiceContext {
    ServiceContext::authenticated("admin".to_string(), "corr-1".to_string()).with_admin()
}

fn default_request() -> UpdateSettingsRequest {
    UpdateSettingsRequest::from_config(&CriteriaConfig::default_active())
}

#[tokio::test]
async fn test_default_configuration_created_on_first_read() {
    let (repository, _, service) = service();
    assert!(repository.get_active().await.unwrap().is_none());

    let config = service.active().await.unwrap();

    assert_eq!(config.weight(Criterion::Visuals), 35.0);
    assert_eq!(config.instructor_weight, 60.0);
    assert_eq!(config.peer_weight, 40.0);
    assert!(config.active);
    assert!(repository.get_active().await.unwrap().is_some());
}

#[tokio::test]
async fn test_criteria_fields_use_labels() {
    let repository = Arc::new(InMemorySettingsRepository::with_config(
        CriteriaConfigBuilder::new()
            .with_label(Criterion::TeamCohesion, "Teamwork")
            .build(),
    ));
    let service = SettingsService::new(repository, Arc::new(MockEventPublisher::new()));

    let fields = service.criteria_fields().await.unwrap();

    assert_eq!(fields.len(), 6);
    assert_eq!(fields[3].key, "team_cohesion");
    assert_eq!(fields[3].label, "Teamwork");
    assert_eq!(fields[5].label, "Overall Impression");
}

#[tokio::test]
async fn test_update_requires_admin() {
    let (repository, _, service) = service();
    let ctx = ServiceContext::authenticated("student".to_string(), "corr-2".to_string());

    let result = service.update(&ctx, default_request()).await;

    assert!(matches!(result, Err(ApplicationError::Forbidden(_))));
    assert_eq!(repository.commit_count(), 0);
}

#[tokio::test]
async fn test_update_replaces_weights_and_labels() {
    // Arrange
    let (_, publisher, service) = service();
    let mut request = default_request()
        .with_weight(Criterion::Visuals, 25.0)
        .with_weight(Criterion::Delivery, 25.0)
        .with_label(Criterion::Visuals, "  Slides  ");
    request.instructor_weight = 70.0;
    request.peer_weight = 30.0;

    // Act
    let committed = service.update(&admin(), request).await.unwrap();

    // Assert
    assert_eq!(committed.weight(Criterion::Visuals), 25.0);
    assert_eq!(committed.weight(Criterion::Delivery), 25.0);
    assert_eq!(committed.label(Criterion::Visuals), "Slides");
    assert_eq!(committed.instructor_weight, 70.0);
    assert_eq!(service.active().await.unwrap(), committed);
    assert_eq!(
        publisher.get_published_events(),
        vec![ServiceEvent::SettingsUpdated {
            settings_id: committed.id,
            updated_by: Some("admin".to_string()),
        }]
    );
}

#[tokio::test]
async fn test_settings_event_records_updating_user() {
    let (_, publisher, service) = service();
    let anonymous_admin = ServiceContext::anonymous("corr-3".to_string()).with_admin();

    let committed = service
        .update(&anonymous_admin, default_request())
        .await
        .unwrap();

    assert_eq!(
        publisher.get_published_events(),
        vec![ServiceEvent::SettingsUpdated {
            settings_id: committed.id,
            updated_by: None,
        }]
    );
}

#[tokio::test]
async fn test_update_rejects_criteria_sum() {
    let (repository, publisher, service) = service();
    let before = service.active().await.unwrap();
    let request = default_request().with_weight(Criterion::Visuals, 40.0);

    let result = service.update(&admin(), request).await;

    match result {
        Err(ApplicationError::ValidationFailed(message)) => assert_eq!(
            message,
            "Criterion weights must sum to 100 (currently 105.00)"
        ),
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(repository.commit_count(), 0);
    assert_eq!(publisher.event_count(), 0);
    assert_eq!(service.active().await.unwrap(), before);
}

#[tokio::test]
async fn test_update_rejects_blend_sum() {
    let (_, _, service) = service();
    let mut request = default_request();
    request.instructor_weight = 65.0;

    let result = service.update(&admin(), request).await;

    match result {
        Err(ApplicationError::ValidationFailed(message)) => assert_eq!(
            message,
            "Instructor and peer weights must sum to 100 (currently 105.00)"
        ),
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_update_accepts_sum_within_tolerance() {
    let (_, _, service) = service();
    let request = default_request().with_weight(Criterion::Visuals, 35.005);

    let committed = service.update(&admin(), request).await.unwrap();

    assert_eq!(committed.weight(Criterion::Visuals), 35.005);
}

#[tokio::test]
async fn test_update_requires_every_weight() {
    let (_, _, service) = service();
    let mut request = default_request();
    request.weights.remove(&Criterion::Attire);

    let result = service.update(&admin(), request).await;

    match result {
        Err(ApplicationError::ValidationFailed(message)) => {
            assert_eq!(message, "Weight for attire is required")
        }
        other => panic!("expected validation failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_omitted_label_restores_default() {
    let repository = Arc::new(InMemorySettingsRepository::with_config(
        CriteriaConfigBuilder::new()
            .with_label(Criterion::Attire, "Dress Code")
            .build(),
    ));
    let service = SettingsService::new(Arc::clone(&repository), Arc::new(MockEventPublisher::new()));
    let mut request = default_request();
    request.labels.clear();

    let committed = service.update(&admin(), request).await.unwrap();

    assert_eq!(committed.label(Criterion::Attire), "Attire");
}

#[tokio::test]
async fn test_repository_rejects_invalid_config() {
    let repository = InMemorySettingsRepository::new();
    let config = CriteriaConfigBuilder::new().with_blend(50.0, 40.0).build();

    let result = repository.commit(&config).await;

    assert!(matches!(result, Err(ApplicationError::ValidationFailed(_))));
    assert!(repository.get_active().await.unwrap().is_none());
}
