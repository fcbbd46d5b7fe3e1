//! Then steps for execution queue BDD scenarios.

use super::world::{QueueWorld, run_async};
use execution_queue::queue::{ports::QueueRepositoryError, services::QueueServiceError};
use eyre::WrapErr;
use rstest_bdd_macros::then;

#[then(
    r#"the last record is service order {service_order_id:u64} with status "{status}" and priority "{priority}""#
)]
fn last_record_matches(
    world: &QueueWorld,
    service_order_id: u64,
    status: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let record = world.last_record()?;
    eyre::ensure!(
        record.service_order_id().value() == service_order_id,
        "expected service order {service_order_id}, found {}",
        record.service_order_id()
    );
    eyre::ensure!(
        record.status().as_str() == status,
        "expected status {status}, found {}",
        record.status()
    );
    eyre::ensure!(
        record.priority().as_str() == priority,
        "expected priority {priority}, found {}",
        record.priority()
    );
    Ok(())
}

#[then("service order {service_order_id:u64} can be retrieved unchanged")]
fn retrieved_unchanged(world: &QueueWorld, service_order_id: u64) -> Result<(), eyre::Report> {
    let created = world.last_record()?;
    eyre::ensure!(created.service_order_id().value() == service_order_id);
    let fetched = run_async(world.service.get(created.service_order_id()))
        .wrap_err("look up queued record")?;
    eyre::ensure!(&fetched == created, "lookup does not match created record");
    Ok(())
}

#[then("the last record is assigned to mechanic {mechanic_id:u64}")]
fn last_record_assigned_to(world: &QueueWorld, mechanic_id: u64) -> Result<(), eyre::Report> {
    let record = world.last_record()?;
    let assigned = record.assigned_mechanic_id().map(|id| id.value());
    eyre::ensure!(
        assigned == Some(mechanic_id),
        "expected mechanic {mechanic_id}, found {assigned:?}"
    );
    Ok(())
}

#[then("queueing fails with a duplicate key error")]
fn duplicate_key_error(world: &QueueWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_record_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing record result in scenario world"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(QueueServiceError::Repository(QueueRepositoryError::DuplicateKey(_)))
        ),
        "expected duplicate key error, got {result:?}"
    );
    Ok(())
}

#[then("the operation fails with a not found error")]
fn not_found_error(world: &QueueWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_record_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing record result in scenario world"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(QueueServiceError::Repository(QueueRepositoryError::NotFound(_)))
        ),
        "expected not found error, got {result:?}"
    );
    Ok(())
}

#[then("the queue reports that it is empty")]
fn queue_is_empty(world: &QueueWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_record_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing record result in scenario world"))?;
    eyre::ensure!(
        matches!(result, Err(QueueServiceError::Empty)),
        "expected empty queue error, got {result:?}"
    );
    Ok(())
}

#[then(r#"the listed service orders are "{expected}""#)]
fn listed_service_orders(world: &QueueWorld, expected: String) -> Result<(), eyre::Report> {
    let listing = world
        .last_listing
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing in scenario world"))?;
    let actual: Vec<String> = listing
        .iter()
        .map(|record| record.service_order_id().to_string())
        .collect();
    let wanted: Vec<&str> = expected.split(',').map(str::trim).collect();
    eyre::ensure!(
        actual == wanted,
        "expected service orders {wanted:?}, found {actual:?}"
    );
    Ok(())
}
