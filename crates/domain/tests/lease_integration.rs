//! Integration tests for the Lease aggregate.
//!
//! These tests verify the revision chain, calendar validation at the
//! service boundary, and termination guards.

use chrono::NaiveDate;
use common::{AggregateId, EntityId, TenantId, UnitId};
use domain::{
    ChargeLine, ConfigureRevisionSchedule, CreateLease, DomainError, LeaseDraft, LeaseError,
    LeaseEvent, LeaseService, Money, ReviseRent, RevisionSchedule, TerminateLease,
};
use event_store::{InMemoryEventStore, Version};

fn create_service() -> LeaseService<InMemoryEventStore> {
    LeaseService::new(InMemoryEventStore::new())
}

fn draft(lease_id: AggregateId) -> LeaseDraft {
    LeaseDraft::new(
        lease_id,
        EntityId::new("sci-dupont"),
        TenantId::new("tenant-martin"),
        UnitId::new("unit-3b"),
        NaiveDate::from_ymd_opt(2023, 7, 1).unwrap(),
        Money::from_cents(60000),
        Money::from_cents(60000),
        5,
        "IRL",
    )
    .with_extra_lines(vec![ChargeLine::new(
        "Service charges",
        Money::from_cents(12000),
        "provision",
    )])
}

#[tokio::test]
async fn revision_chain_references_preceding_rent_after_reload() {
    let service = create_service();
    let lease_id = AggregateId::new();

    service
        .create_lease(CreateLease::new(draft(lease_id)))
        .await
        .unwrap();

    service
        .revise_rent(ReviseRent::new(
            lease_id,
            Money::from_cents(65000),
            142.06,
            "Q2",
            2025,
            "rev-1",
        ))
        .await
        .unwrap();

    // Second revision replays the first from the store, so its
    // previous_rent is the revised 65000, not the original 60000.
    let result = service
        .revise_rent(ReviseRent::new(
            lease_id,
            Money::from_cents(67000),
            145.0,
            "Q3",
            2026,
            "rev-2",
        ))
        .await
        .unwrap();

    assert_eq!(result.events.len(), 1);
    if let LeaseEvent::RentRevised(data) = &result.events[0] {
        assert_eq!(data.previous_rent.cents(), 65000);
        assert_eq!(data.new_rent.cents(), 67000);
        assert_eq!(data.revision_id, "rev-2");
    } else {
        panic!("Expected RentRevised event");
    }
    assert_eq!(result.aggregate.current_rent().cents(), 67000);
    assert_eq!(result.new_version, Version::new(3));
}

#[tokio::test]
async fn duplicate_revision_delivery_is_a_persisted_noop() {
    let service = create_service();
    let lease_id = AggregateId::new();

    service
        .create_lease(CreateLease::new(draft(lease_id)))
        .await
        .unwrap();
    service
        .revise_rent(ReviseRent::new(
            lease_id,
            Money::from_cents(65000),
            142.06,
            "Q2",
            2025,
            "rev-1",
        ))
        .await
        .unwrap();

    // The upstream scheduler redelivers rev-1 with different numbers;
    // the lease keeps the already-applied amounts.
    let result = service
        .revise_rent(ReviseRent::new(
            lease_id,
            Money::from_cents(99000),
            160.0,
            "Q4",
            2026,
            "rev-1",
        ))
        .await
        .unwrap();

    assert!(result.events.is_empty());
    assert_eq!(result.aggregate.current_rent().cents(), 65000);

    let lease = service.get_lease(lease_id).await.unwrap().unwrap();
    assert_eq!(
        lease.state().unwrap().last_applied_revision_id.as_deref(),
        Some("rev-1")
    );
}

#[tokio::test]
async fn calendar_validation_at_the_service_boundary() {
    let service = create_service();
    let lease_id = AggregateId::new();

    service
        .create_lease(CreateLease::new(draft(lease_id)))
        .await
        .unwrap();

    let err = service
        .configure_revision_schedule(ConfigureRevisionSchedule::new(
            lease_id,
            RevisionSchedule::new(31, 4, "Q2", 2025),
        ))
        .await
        .unwrap_err();
    match err {
        DomainError::Lease(e) => {
            assert_eq!(e.to_string(), "Day 31 is not valid for month 4");
        }
        other => panic!("Unexpected error: {other}"),
    }

    // Day 28 in February and day 31 in January are both valid anchors.
    service
        .configure_revision_schedule(ConfigureRevisionSchedule::new(
            lease_id,
            RevisionSchedule::new(28, 2, "Q1", 2025),
        ))
        .await
        .unwrap();
    service
        .configure_revision_schedule(ConfigureRevisionSchedule::new(
            lease_id,
            RevisionSchedule::new(31, 1, "Q1", 2025),
        ))
        .await
        .unwrap();
}

#[tokio::test]
async fn termination_guards_and_effects() {
    let service = create_service();
    let lease_id = AggregateId::new();
    let start_date = NaiveDate::from_ymd_opt(2023, 7, 1).unwrap();

    service
        .create_lease(CreateLease::new(draft(lease_id)))
        .await
        .unwrap();

    // Ending before the start date is an invariant violation.
    let err = service
        .terminate_lease(TerminateLease::new(
            lease_id,
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        ))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Lease(LeaseError::EndDateBeforeStart { .. })
    ));

    // Terminating on the start date itself is accepted.
    service
        .terminate_lease(TerminateLease::new(lease_id, start_date))
        .await
        .unwrap();

    let err = service
        .terminate_lease(TerminateLease::new(lease_id, start_date))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Lease(LeaseError::AlreadyTerminated)
    ));

    // A terminated lease refuses revisions.
    let err = service
        .revise_rent(ReviseRent::new(
            lease_id,
            Money::from_cents(65000),
            142.06,
            "Q2",
            2025,
            "rev-1",
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Lease(LeaseError::Terminated)));
}

#[tokio::test]
async fn operations_on_missing_lease_fail_with_not_created() {
    let service = create_service();

    let err = service
        .revise_rent(ReviseRent::new(
            AggregateId::new(),
            Money::from_cents(65000),
            142.06,
            "Q2",
            2025,
            "rev-1",
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Lease(LeaseError::NotCreated)));

    assert!(service.get_lease(AggregateId::new()).await.unwrap().is_none());
}
