//! In-memory integration tests for queue record lifecycle operations.

use super::helpers::{TestService, service, service_order};
use chrono::TimeDelta;
use execution_queue::queue::{
    domain::{ExecutionStatus, MechanicId, Priority, RecordPatch},
    ports::QueueRepositoryError,
    services::{CreateRecordRequest, QueueServiceError},
};
use eyre::{Result, ensure};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_moves_through_diagnosis_and_repair(service: TestService) -> Result<()> {
    let created = service
        .create(CreateRecordRequest::new(301).with_priority(Priority::High))
        .await?;
    let diagnosis_start = created.created_at() + TimeDelta::minutes(5);
    let repair_start = created.created_at() + TimeDelta::minutes(50);

    service
        .update(
            service_order(301),
            RecordPatch::new()
                .with_status(ExecutionStatus::InDiagnosis)
                .with_assigned_mechanic(Some(MechanicId::new(9)?))
                .with_diagnosis_started_at(Some(diagnosis_start)),
        )
        .await?;
    service
        .update(
            service_order(301),
            RecordPatch::new()
                .with_status(ExecutionStatus::InRepair)
                .with_diagnosis(Some("cracked radiator hose".to_owned()))
                .with_diagnosis_finished_at(Some(repair_start))
                .with_repair_started_at(Some(repair_start)),
        )
        .await?;
    let finished = service
        .update(
            service_order(301),
            RecordPatch::new()
                .with_status(ExecutionStatus::Finished)
                .with_repair_notes(Some("hose replaced, coolant topped up".to_owned()))
                .with_repair_finished_at(Some(repair_start + TimeDelta::hours(1))),
        )
        .await?;

    ensure!(finished.status() == ExecutionStatus::Finished);
    ensure!(finished.assigned_mechanic_id().map(MechanicId::value) == Some(9));
    ensure!(finished.diagnosis() == Some("cracked radiator hose"));
    ensure!(finished.repair_notes() == Some("hose replaced, coolant topped up"));
    ensure!(finished.diagnosis_started_at() == Some(diagnosis_start));
    ensure!(finished.created_at() == created.created_at());
    ensure!(finished.updated_at() > created.updated_at());
    ensure!(service.get(service_order(301)).await? == finished);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_create_leaves_original_untouched(service: TestService) -> Result<()> {
    let original = service.create(CreateRecordRequest::new(1)).await?;

    let duplicate = service
        .create(CreateRecordRequest::new(1).with_priority(Priority::Urgent))
        .await;

    ensure!(matches!(
        duplicate,
        Err(QueueServiceError::Repository(QueueRepositoryError::DuplicateKey(id)))
            if id.value() == 1
    ));
    ensure!(service.get(service_order(1)).await? == original);
    ensure!(service.list_ordered().await?.len() == 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_service_order_fails(service: TestService) {
    let result = service
        .update(
            service_order(999),
            RecordPatch::new().with_status(ExecutionStatus::InRepair),
        )
        .await;

    assert!(matches!(
        result,
        Err(QueueServiceError::Repository(QueueRepositoryError::NotFound(id))) if id.value() == 999
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removed_service_order_can_be_queued_again(service: TestService) -> Result<()> {
    let first = service.create(CreateRecordRequest::new(55)).await?;
    service.remove(service_order(55)).await?;

    let second = service.create(CreateRecordRequest::new(55)).await?;

    ensure!(second.id() != first.id());
    ensure!(matches!(
        service.remove(service_order(56)).await,
        Err(QueueServiceError::Repository(QueueRepositoryError::NotFound(_)))
    ));
    Ok(())
}
