//! In-memory integration tests for queue ordering.

use super::helpers::{TestService, service, service_order};
use execution_queue::queue::{
    domain::{ExecutionQueueRecord, ExecutionStatus, Priority, RecordPatch},
    services::{CreateRecordRequest, QueueServiceError},
};
use eyre::{Result, ensure};
use futures::TryStreamExt;
use rstest::rstest;

fn service_order_values(records: &[ExecutionQueueRecord]) -> Vec<u64> {
    records
        .iter()
        .map(|record| record.service_order_id().value())
        .collect()
}

async fn queue_all(service: &TestService, orders: &[(u64, Priority)]) -> Result<()> {
    for (service_order_id, priority) in orders {
        service
            .create(CreateRecordRequest::new(*service_order_id).with_priority(*priority))
            .await?;
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn urgent_high_normal_order_regardless_of_insertion(service: TestService) -> Result<()> {
    queue_all(
        &service,
        &[
            (1, Priority::Normal),
            (2, Priority::High),
            (3, Priority::Urgent),
        ],
    )
    .await?;

    let ordered = service_order_values(&service.list_ordered().await?);
    ensure!(ordered == vec![3, 2, 1], "unexpected order {ordered:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn equal_priority_orders_by_creation_time(service: TestService) -> Result<()> {
    queue_all(
        &service,
        &[
            (40, Priority::High),
            (10, Priority::High),
            (30, Priority::High),
        ],
    )
    .await?;

    let next = service.next_in_queue().await?;
    let ordered = service_order_values(&service.list_ordered().await?);

    ensure!(next.service_order_id().value() == 40);
    ensure!(ordered == vec![40, 10, 30], "unexpected order {ordered:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_listing_matches_status_and_keeps_queue_order(
    service: TestService,
) -> Result<()> {
    queue_all(
        &service,
        &[
            (1, Priority::Low),
            (2, Priority::Urgent),
            (3, Priority::Normal),
            (4, Priority::Urgent),
        ],
    )
    .await?;
    service
        .update(
            service_order(4),
            RecordPatch::new().with_status(ExecutionStatus::InDiagnosis),
        )
        .await?;

    let awaiting: Vec<ExecutionQueueRecord> = service
        .list_by_status(ExecutionStatus::Awaiting)
        .try_collect()
        .await?;
    let in_diagnosis: Vec<ExecutionQueueRecord> = service
        .list_by_status(ExecutionStatus::InDiagnosis)
        .try_collect()
        .await?;

    ensure!(service_order_values(&awaiting) == vec![2, 3, 1]);
    ensure!(service_order_values(&in_diagnosis) == vec![4]);
    ensure!(awaiting
        .iter()
        .all(|record| record.status() == ExecutionStatus::Awaiting));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn next_in_queue_skips_records_already_in_work(service: TestService) -> Result<()> {
    queue_all(&service, &[(1, Priority::Urgent), (2, Priority::Low)]).await?;
    service
        .update(
            service_order(1),
            RecordPatch::new().with_status(ExecutionStatus::InRepair),
        )
        .await?;

    ensure!(service.next_in_queue().await?.service_order_id().value() == 2);

    service
        .update(
            service_order(2),
            RecordPatch::new().with_status(ExecutionStatus::InDiagnosis),
        )
        .await?;
    ensure!(matches!(
        service.next_in_queue().await,
        Err(QueueServiceError::Empty)
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn priority_change_reorders_queue(service: TestService) -> Result<()> {
    queue_all(&service, &[(1, Priority::Normal), (2, Priority::Normal)]).await?;

    service
        .update(
            service_order(2),
            RecordPatch::new().with_priority(Priority::Urgent),
        )
        .await?;

    ensure!(service.next_in_queue().await?.service_order_id().value() == 2);
    Ok(())
}
